//! # Drills Core
//!
//! Core business logic for the interview drills service.
//!
//! This crate contains pure data operations:
//! - The drill, attempt and user model, plus drill validation
//! - The attempt scorer (keyword matching against free-text answers)
//! - A TTL cache for the drill list
//! - Document storage (sharded YAML files, or in memory)
//! - Services that tie these together, and the built-in seed drills
//!
//! **No API concerns**: authentication, HTTP servers and wire types belong in `api-rest` or
//! `api-shared`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod repositories;
pub mod scoring;
pub mod seed;
pub mod store;
pub mod validation;

pub use cache::{Clock, SystemClock, TtlCache};
pub use config::CoreConfig;
pub use constants::*;
pub use error::{DrillsError, DrillsResult};
pub use model::{
    Answer, Attempt, Difficulty, Drill, DrillSummary, NewDrill, NewQuestion, Provider, Question,
    User,
};
pub use repositories::attempts::{AttemptHistoryEntry, AttemptService, DrillRef, SubmittedAttempt};
pub use repositories::drills::{DrillService, SeedOutcome};
pub use repositories::users::{NewUser, UserService};
pub use scoring::{score_attempt, score_questions, ScoreDetail, ScoreReport};
pub use store::{DocumentStore, FileStore, MemoryStore};
pub use validation::{validate_new_drill, DrillProblem, DrillValidationError, ValidatedDrill};

pub use drills_types::{EmailAddress, NonEmptyText, TextError};
pub use drills_uuid::ShardableUuid;
