use crate::error::ApiError;
use crate::AppState;
use api_shared::auth::{parse_user_id, validate_api_key, API_KEY_HEADER, USER_ID_HEADER};
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use drills_core::ShardableUuid;

/// The signed-in user, as vouched for by the trusted front end.
///
/// Rejects with `401 UNAUTHORIZED` unless `x-api-key` matches the configured key and
/// `x-user-id` carries a canonical user id.
#[derive(Clone, Debug)]
pub struct CallerIdentity(pub ShardableUuid);

#[async_trait]
impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = |name: &str| parts.headers.get(name).and_then(|v| v.to_str().ok());

        validate_api_key(header(API_KEY_HEADER), &state.api_key)?;
        let user_id = parse_user_id(header(USER_ID_HEADER))?;
        Ok(CallerIdentity(user_id))
    }
}
