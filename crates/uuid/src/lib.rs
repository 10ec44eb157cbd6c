//! Record identifiers and sharded-path utilities.
//!
//! Every stored document (drill, attempt, user) is addressed by a *canonical* UUID:
//! **32 lowercase hexadecimal characters** (no hyphens), the same value you get from
//! `Uuid::new_v4().simple().to_string()`.
//!
//! Canonical form is required for externally supplied identifiers (path segments, request
//! bodies, CLI arguments). Use [`ShardableUuid::parse`] to validate an input string;
//! non-canonical values (uppercase, hyphenated, wrong length, non-hex) are rejected.
//!
//! ## Sharded directory layout
//! For a canonical UUID `u`, documents live under:
//! `parent_dir/<u[0..2]>/<u[2..4]>/<u>/`
//!
//! Example:
//! `drill_data/attempts/55/0e/550e8400e29b41d4a716446655440000/`
//!
//! This keeps any single directory from growing without bound.

mod service;

pub use service::{ShardableUuid, Uuid};

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;
