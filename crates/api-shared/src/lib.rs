//! # API Shared
//!
//! Shared definitions for the drills HTTP API.
//!
//! Contains:
//! - Wire types (`wire` module): camelCase JSON request/response bodies with OpenAPI schemas
//! - The error envelope returned by every failing endpoint
//! - Shared services like `HealthService`
//! - Caller authentication helpers
//!
//! Used by `api-rest`; kept free of any HTTP framework.

pub mod auth;
pub mod error;
pub mod health;
pub mod wire;

pub use error::{ErrorBody, ErrorCode, ErrorRes};
pub use health::HealthService;
pub use wire::*;
