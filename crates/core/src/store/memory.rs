use super::DocumentStore;
use crate::model::{Attempt, Drill, User};
use crate::{DrillsError, DrillsResult};
use drills_types::EmailAddress;
use drills_uuid::ShardableUuid;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Collections {
    drills: HashMap<ShardableUuid, Drill>,
    attempts: HashMap<ShardableUuid, Attempt>,
    users: HashMap<ShardableUuid, User>,
}

/// Keeps every document in memory. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.inner.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.inner.write().unwrap_or_else(|p| p.into_inner())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.read();
        f.debug_struct("MemoryStore")
            .field("drills", &inner.drills.len())
            .field("attempts", &inner.attempts.len())
            .field("users", &inner.users.len())
            .finish()
    }
}

impl DocumentStore for MemoryStore {
    fn insert_drill(&self, drill: &Drill) -> DrillsResult<()> {
        let mut inner = self.write();
        if inner.drills.contains_key(&drill.id) {
            return Err(DrillsError::AlreadyExists(drill.id.to_string()));
        }
        inner.drills.insert(drill.id.clone(), drill.clone());
        Ok(())
    }

    fn get_drill(&self, id: &ShardableUuid) -> DrillsResult<Option<Drill>> {
        Ok(self.read().drills.get(id).cloned())
    }

    fn list_drills(&self) -> DrillsResult<Vec<Drill>> {
        Ok(self.read().drills.values().cloned().collect())
    }

    fn insert_attempt(&self, attempt: &Attempt) -> DrillsResult<()> {
        let mut inner = self.write();
        if inner.attempts.contains_key(&attempt.id) {
            return Err(DrillsError::AlreadyExists(attempt.id.to_string()));
        }
        inner.attempts.insert(attempt.id.clone(), attempt.clone());
        Ok(())
    }

    fn get_attempt(&self, id: &ShardableUuid) -> DrillsResult<Option<Attempt>> {
        Ok(self.read().attempts.get(id).cloned())
    }

    fn list_attempts_for_user(&self, user_id: &ShardableUuid) -> DrillsResult<Vec<Attempt>> {
        Ok(self
            .read()
            .attempts
            .values()
            .filter(|a| &a.user_id == user_id)
            .cloned()
            .collect())
    }

    fn upsert_user(&self, user: &User) -> DrillsResult<()> {
        self.write().users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    fn get_user(&self, id: &ShardableUuid) -> DrillsResult<Option<User>> {
        Ok(self.read().users.get(id).cloned())
    }

    fn find_user_by_email(&self, email: &EmailAddress) -> DrillsResult<Option<User>> {
        Ok(self
            .read()
            .users
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }
}
