//! Caller authentication.
//!
//! Sign-in happens in front of this service. The trusted front end forwards each request with a
//! shared API key and the id of the signed-in user; both must be present and valid.

use drills_core::ShardableUuid;

/// Header carrying the shared secret of the trusted front end.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Header carrying the canonical id of the signed-in user.
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing API key")]
    MissingApiKey,
    #[error("invalid API key")]
    InvalidApiKey,
    #[error("missing user id")]
    MissingUserId,
    #[error("invalid user id")]
    InvalidUserId,
}

/// Validates the provided API key against the configured one.
pub fn validate_api_key(provided_key: Option<&str>, expected_key: &str) -> Result<(), AuthError> {
    let provided_key = provided_key.ok_or(AuthError::MissingApiKey)?;
    if constant_time_eq(provided_key.as_bytes(), expected_key.as_bytes()) {
        Ok(())
    } else {
        Err(AuthError::InvalidApiKey)
    }
}

/// Parses the forwarded user id. Only the canonical 32-hex form is accepted.
pub fn parse_user_id(provided: Option<&str>) -> Result<ShardableUuid, AuthError> {
    let provided = provided.ok_or(AuthError::MissingUserId)?;
    ShardableUuid::parse(provided.trim()).map_err(|_| AuthError::InvalidUserId)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
