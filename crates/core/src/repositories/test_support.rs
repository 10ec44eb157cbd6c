use crate::model::{Attempt, Drill, NewDrill, NewQuestion, User};
use crate::store::{DocumentStore, MemoryStore};
use crate::DrillsResult;
use drills_types::EmailAddress;
use drills_uuid::ShardableUuid;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

type Hook = Box<dyn FnOnce() + Send>;

/// A valid five-question drill input titled `title`.
pub(crate) fn new_drill(title: &str) -> NewDrill {
    NewDrill {
        title: title.to_string(),
        difficulty: "easy".into(),
        tags: vec!["javascript".into()],
        questions: vec![
            question("js1", &["scope", "hoisting", "reassignment", "redeclaration"]),
            question("js2", &["closure", "function", "scope", "lexical"]),
            question("js3", &["this", "context", "binding", "arrow"]),
            question("js4", &["equality", "strict", "type", "coercion"]),
            question("js5", &["promise", "async", "await", "then", "catch"]),
        ],
    }
}

fn question(id: &str, keywords: &[&str]) -> NewQuestion {
    NewQuestion {
        id: id.to_string(),
        prompt: format!("Prompt for {id}"),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

/// Memory store that counts drill-list reads and can run a hook between a list read and its
/// return to the caller.
#[derive(Default)]
pub(crate) struct CountingStore {
    inner: MemoryStore,
    list_drills: AtomicUsize,
    after_list: Mutex<Option<Hook>>,
}

impl CountingStore {
    pub(crate) fn list_drill_calls(&self) -> usize {
        self.list_drills.load(Ordering::SeqCst)
    }

    /// Runs `hook` once, right after the next `list_drills` has read its result.
    pub(crate) fn after_next_list(&self, hook: impl FnOnce() + Send + 'static) {
        *self.after_list.lock().unwrap() = Some(Box::new(hook));
    }
}

impl DocumentStore for CountingStore {
    fn insert_drill(&self, drill: &Drill) -> DrillsResult<()> {
        self.inner.insert_drill(drill)
    }

    fn get_drill(&self, id: &ShardableUuid) -> DrillsResult<Option<Drill>> {
        self.inner.get_drill(id)
    }

    fn list_drills(&self) -> DrillsResult<Vec<Drill>> {
        self.list_drills.fetch_add(1, Ordering::SeqCst);
        let drills = self.inner.list_drills()?;
        let hook = self.after_list.lock().unwrap().take();
        if let Some(hook) = hook {
            hook();
        }
        Ok(drills)
    }

    fn insert_attempt(&self, attempt: &Attempt) -> DrillsResult<()> {
        self.inner.insert_attempt(attempt)
    }

    fn get_attempt(&self, id: &ShardableUuid) -> DrillsResult<Option<Attempt>> {
        self.inner.get_attempt(id)
    }

    fn list_attempts_for_user(&self, user_id: &ShardableUuid) -> DrillsResult<Vec<Attempt>> {
        self.inner.list_attempts_for_user(user_id)
    }

    fn upsert_user(&self, user: &User) -> DrillsResult<()> {
        self.inner.upsert_user(user)
    }

    fn get_user(&self, id: &ShardableUuid) -> DrillsResult<Option<User>> {
        self.inner.get_user(id)
    }

    fn find_user_by_email(&self, email: &EmailAddress) -> DrillsResult<Option<User>> {
        self.inner.find_user_by_email(email)
    }
}
