//! Attempt submission and history.
//!
//! Submitting an attempt looks up the drill, scores the answers and stores
//! `{user_id, drill_id, answers, score}` as a new, immutable attempt. There is no
//! deduplication: submitting the same answers twice stores two attempts.

use crate::constants::MAX_HISTORY_LIMIT;
use crate::error::{DrillsError, DrillsResult};
use crate::model::{Answer, Attempt, Difficulty, Drill};
use crate::scoring::{score_attempt, ScoreDetail, ScoreReport};
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use drills_types::NonEmptyText;
use drills_uuid::ShardableUuid;
use std::collections::HashMap;
use std::sync::Arc;

/// A stored attempt together with its per-answer report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmittedAttempt {
    pub attempt: Attempt,
    pub details: Vec<ScoreDetail>,
}

/// The drill fields shown next to an attempt in the history view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrillRef {
    pub id: ShardableUuid,
    pub title: NonEmptyText,
    pub difficulty: Difficulty,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptHistoryEntry {
    pub id: ShardableUuid,
    /// `None` when the drill has since disappeared from the store.
    pub drill: Option<DrillRef>,
    pub score: u8,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AttemptService {
    store: Arc<dyn DocumentStore>,
}

impl AttemptService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Scores and stores one submission for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `DrillsError::DrillNotFound` if `drill_id` names no drill (malformed ids
    /// included). Storage failures are passed through.
    pub fn submit(
        &self,
        user_id: &ShardableUuid,
        drill_id: &str,
        answers: Vec<Answer>,
    ) -> DrillsResult<SubmittedAttempt> {
        let drill = self.load_drill(drill_id)?;
        let report = score_attempt(&drill, &answers);

        let attempt = Attempt {
            id: ShardableUuid::new(),
            user_id: user_id.clone(),
            drill_id: drill.id.clone(),
            answers,
            score: report.score,
            created_at: Utc::now(),
        };
        self.store.insert_attempt(&attempt)?;

        tracing::info!(
            attempt_id = %attempt.id,
            %user_id,
            drill_id = %drill.id,
            score = attempt.score,
            "attempt recorded"
        );

        Ok(SubmittedAttempt {
            attempt,
            details: report.details,
        })
    }

    /// Scores answers against a drill without storing anything.
    pub fn preview(&self, drill_id: &str, answers: &[Answer]) -> DrillsResult<ScoreReport> {
        let drill = self.load_drill(drill_id)?;
        Ok(score_attempt(&drill, answers))
    }

    /// The most recent attempts of `user_id`, newest first, at most `limit` of them.
    ///
    /// # Errors
    ///
    /// Returns `DrillsError::InvalidInput` if `limit` is zero or above
    /// [`MAX_HISTORY_LIMIT`].
    pub fn history(
        &self,
        user_id: &ShardableUuid,
        limit: usize,
    ) -> DrillsResult<Vec<AttemptHistoryEntry>> {
        if limit == 0 || limit > MAX_HISTORY_LIMIT {
            return Err(DrillsError::InvalidInput(format!(
                "limit must be between 1 and {}",
                MAX_HISTORY_LIMIT
            )));
        }

        let mut attempts = self.store.list_attempts_for_user(user_id)?;
        attempts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        attempts.truncate(limit);

        let mut drills: HashMap<ShardableUuid, Option<DrillRef>> = HashMap::new();
        let mut entries = Vec::with_capacity(attempts.len());
        for attempt in attempts {
            let drill = match drills.get(&attempt.drill_id) {
                Some(cached) => cached.clone(),
                None => {
                    let loaded = self.store.get_drill(&attempt.drill_id)?.map(|d| DrillRef {
                        id: d.id,
                        title: d.title,
                        difficulty: d.difficulty,
                    });
                    if loaded.is_none() {
                        tracing::warn!(
                            attempt_id = %attempt.id,
                            drill_id = %attempt.drill_id,
                            "attempt references a missing drill"
                        );
                    }
                    drills.insert(attempt.drill_id.clone(), loaded.clone());
                    loaded
                }
            };

            entries.push(AttemptHistoryEntry {
                id: attempt.id,
                drill,
                score: attempt.score,
                created_at: attempt.created_at,
            });
        }

        Ok(entries)
    }

    fn load_drill(&self, drill_id: &str) -> DrillsResult<Drill> {
        let Ok(id) = ShardableUuid::parse(drill_id) else {
            return Err(DrillsError::DrillNotFound(drill_id.to_string()));
        };
        self.store
            .get_drill(&id)?
            .ok_or_else(|| DrillsError::DrillNotFound(drill_id.to_string()))
    }
}
