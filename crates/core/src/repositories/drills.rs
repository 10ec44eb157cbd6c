//! Drill management.
//!
//! Drills are created once (validated, then stored) and never modified. The drill list is
//! served from a [`TtlCache`] keyed by [`DRILLS_LIST_CACHE_KEY`]; creating a drill drops the
//! cached list so the new drill shows up immediately.

use crate::cache::TtlCache;
use crate::config::CoreConfig;
use crate::constants::DRILLS_LIST_CACHE_KEY;
use crate::error::{DrillsError, DrillsResult};
use crate::model::{Drill, DrillSummary, NewDrill};
use crate::store::DocumentStore;
use crate::validation::validate_new_drill;
use chrono::Utc;
use drills_uuid::ShardableUuid;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Result of seeding drills.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub created: Vec<Drill>,
    /// Titles that already existed and were left alone.
    pub skipped: Vec<String>,
}

/// Service for creating, listing and fetching drills.
#[derive(Clone)]
pub struct DrillService {
    store: Arc<dyn DocumentStore>,
    list_cache: Arc<TtlCache<String, Vec<DrillSummary>>>,
    /// Bumped on every write that invalidates the list. A list read only caches its result if
    /// no write happened while it was loading.
    list_generation: Arc<AtomicU64>,
}

impl DrillService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        list_cache: Arc<TtlCache<String, Vec<DrillSummary>>>,
    ) -> Self {
        Self {
            store,
            list_cache,
            list_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Creates a service whose list cache follows the TTL and capacity in `cfg`.
    pub fn from_config(store: Arc<dyn DocumentStore>, cfg: &CoreConfig) -> Self {
        let cache = TtlCache::new(cfg.drills_cache_ttl(), cfg.drills_cache_max_entries());
        Self::new(store, Arc::new(cache))
    }

    /// Validates and stores a new drill.
    ///
    /// # Errors
    ///
    /// Returns `DrillsError::InvalidDrill` if validation fails; nothing is written in that
    /// case. Storage failures are passed through.
    pub fn create_drill(&self, new: NewDrill) -> DrillsResult<Drill> {
        let validated = validate_new_drill(new)?;
        let drill = validated.into_drill(ShardableUuid::new(), Utc::now());

        self.store.insert_drill(&drill)?;
        self.invalidate_list();

        tracing::info!(drill_id = %drill.id, title = %drill.title, "drill created");
        Ok(drill)
    }

    /// Lists drill summaries, newest first.
    ///
    /// Served from the cache while fresh; otherwise loaded from the store and cached.
    pub fn list_drills(&self) -> DrillsResult<Vec<DrillSummary>> {
        if let Some(cached) = self.list_cache.get(DRILLS_LIST_CACHE_KEY) {
            tracing::debug!("drill list served from cache");
            return Ok(cached);
        }

        let generation = self.list_generation.load(Ordering::SeqCst);
        let mut drills = self.store.list_drills()?;
        drills.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.title.cmp(&b.title))
        });
        let summaries: Vec<DrillSummary> = drills.iter().map(Drill::summary).collect();

        if self.list_generation.load(Ordering::SeqCst) == generation {
            self.list_cache
                .insert(DRILLS_LIST_CACHE_KEY.to_string(), summaries.clone());
        } else {
            tracing::debug!("drill list changed while loading; not cached");
        }
        Ok(summaries)
    }

    /// Fetches one drill by its canonical id.
    ///
    /// # Errors
    ///
    /// Returns `DrillsError::DrillNotFound` if no drill has this id, including when `id` is
    /// not a canonical identifier at all.
    pub fn get_drill(&self, id: &str) -> DrillsResult<Drill> {
        let Ok(drill_id) = ShardableUuid::parse(id) else {
            return Err(DrillsError::DrillNotFound(id.to_string()));
        };

        self.store
            .get_drill(&drill_id)?
            .ok_or_else(|| DrillsError::DrillNotFound(id.to_string()))
    }

    /// Creates every drill in `drills` whose title is not already taken.
    ///
    /// All drills are validated before any is written, so a bad seed set writes nothing.
    pub fn seed(&self, drills: Vec<NewDrill>) -> DrillsResult<SeedOutcome> {
        let validated = drills
            .into_iter()
            .map(validate_new_drill)
            .collect::<Result<Vec<_>, _>>()?;

        let mut existing: HashSet<String> = self
            .store
            .list_drills()?
            .into_iter()
            .map(|d| d.title.into_string())
            .collect();

        let mut outcome = SeedOutcome::default();
        for drill in validated {
            let title = drill.title().as_str().to_string();
            if !existing.insert(title.clone()) {
                tracing::debug!(%title, "seed drill already present");
                outcome.skipped.push(title);
                continue;
            }

            let drill = drill.into_drill(ShardableUuid::new(), Utc::now());
            self.store.insert_drill(&drill)?;
            outcome.created.push(drill);
        }

        if !outcome.created.is_empty() {
            self.invalidate_list();
        }

        tracing::info!(
            created = outcome.created.len(),
            skipped = outcome.skipped.len(),
            "seeded drills"
        );
        Ok(outcome)
    }

    // Bump before dropping the entry so a concurrent load that read the old list cannot
    // cache it afterwards.
    fn invalidate_list(&self) {
        self.list_generation.fetch_add(1, Ordering::SeqCst);
        self.list_cache.invalidate(DRILLS_LIST_CACHE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::tests::ManualClock;
    use crate::repositories::test_support::{new_drill, CountingStore};
    use crate::store::MemoryStore;
    use crate::validation::DrillProblem;
    use std::time::Duration;

    fn service_with_clock(store: Arc<dyn DocumentStore>) -> (DrillService, Arc<ManualClock>) {
        let clock = ManualClock::new();
        let cache = TtlCache::with_clock(Duration::from_secs(60), 4, clock.clone());
        (DrillService::new(store, Arc::new(cache)), clock)
    }

    #[test]
    fn create_rejects_wrong_question_count_before_persisting() {
        let store = Arc::new(MemoryStore::new());
        let (service, _) = service_with_clock(store.clone());
        let mut new = new_drill("Short");
        new.questions.truncate(3);

        let err = service.create_drill(new).expect_err("should be rejected");
        match err {
            DrillsError::InvalidDrill(e) => assert_eq!(
                e.problems,
                vec![DrillProblem::WrongQuestionCount {
                    expected: 5,
                    actual: 3
                }]
            ),
            other => panic!("expected InvalidDrill, got {other:?}"),
        }
        assert!(store.list_drills().unwrap().is_empty());
    }

    #[test]
    fn list_is_newest_first() {
        let store = Arc::new(MemoryStore::new());
        let (service, _) = service_with_clock(store.clone());

        let mut older = validate_new_drill(new_drill("Older"))
            .unwrap()
            .into_drill(ShardableUuid::new(), Utc::now());
        older.created_at -= chrono::Duration::hours(1);
        store.insert_drill(&older).unwrap();
        service.create_drill(new_drill("Newer")).unwrap();

        let titles: Vec<String> = service
            .list_drills()
            .unwrap()
            .into_iter()
            .map(|s| s.title.into_string())
            .collect();
        assert_eq!(titles, vec!["Newer".to_string(), "Older".to_string()]);
    }

    #[test]
    fn list_is_cached_until_ttl_expires() {
        let store = Arc::new(CountingStore::default());
        let (service, clock) = service_with_clock(store.clone());
        service.create_drill(new_drill("Cached")).unwrap();

        service.list_drills().unwrap();
        service.list_drills().unwrap();
        assert_eq!(store.list_drill_calls(), 1, "second call should hit the cache");

        clock.advance(Duration::from_secs(60));
        service.list_drills().unwrap();
        assert_eq!(store.list_drill_calls(), 2, "expired entry should reload");
    }

    #[test]
    fn create_invalidates_cached_list() {
        let store = Arc::new(MemoryStore::new());
        let (service, _) = service_with_clock(store);
        service.create_drill(new_drill("First")).unwrap();
        assert_eq!(service.list_drills().unwrap().len(), 1);

        service.create_drill(new_drill("Second")).unwrap();
        assert_eq!(service.list_drills().unwrap().len(), 2);
    }

    #[test]
    fn create_during_list_load_does_not_cache_stale_list() {
        let store = Arc::new(CountingStore::default());
        let (service, _) = service_with_clock(store.clone());
        let writer = service.clone();
        store.after_next_list(move || {
            writer.create_drill(new_drill("Fresh")).unwrap();
        });

        // This load read the store before "Fresh" was written.
        assert!(service.list_drills().unwrap().is_empty());

        assert_eq!(store.list_drills().unwrap().len(), 1);
        assert_eq!(service.list_drills().unwrap().len(), 1);
    }

    #[test]
    fn get_drill_distinguishes_missing_and_malformed_ids() {
        let store = Arc::new(MemoryStore::new());
        let (service, _) = service_with_clock(store);
        let created = service.create_drill(new_drill("Findable")).unwrap();

        assert_eq!(service.get_drill(&created.id.to_string()).unwrap(), created);
        assert!(matches!(
            service.get_drill(&ShardableUuid::new().to_string()),
            Err(DrillsError::DrillNotFound(_))
        ));
        assert!(matches!(
            service.get_drill("65a1b2c3d4e5f6g7h8i9j0k1"),
            Err(DrillsError::DrillNotFound(id)) if id == "65a1b2c3d4e5f6g7h8i9j0k1"
        ));
    }

    #[test]
    fn seed_skips_existing_titles() {
        let store = Arc::new(MemoryStore::new());
        let (service, _) = service_with_clock(store.clone());
        service.create_drill(new_drill("React Hooks")).unwrap();

        let outcome = service
            .seed(vec![new_drill("React Hooks"), new_drill("System Design")])
            .unwrap();

        assert_eq!(outcome.skipped, vec!["React Hooks".to_string()]);
        assert_eq!(outcome.created.len(), 1);
        assert_eq!(store.list_drills().unwrap().len(), 2);

        let again = service.seed(vec![new_drill("System Design")]).unwrap();
        assert!(again.created.is_empty());
    }

    #[test]
    fn seed_writes_nothing_when_any_drill_is_invalid() {
        let store = Arc::new(MemoryStore::new());
        let (service, _) = service_with_clock(store.clone());
        let mut bad = new_drill("Bad");
        bad.difficulty = "impossible".into();

        assert!(service.seed(vec![new_drill("Good"), bad]).is_err());
        assert!(store.list_drills().unwrap().is_empty());
    }
}
