use crate::error::{ApiError, AppJson};
use crate::extract::CallerIdentity;
use crate::AppState;
use api_shared::{
    DrillRes, ErrorRes, HealthRes, HealthService, ListAttemptsRes, ListDrillsRes, MeRes,
    SubmitAttemptReq, SubmitAttemptRes,
};
use axum::extract::{Path, Query, State};
use axum::response::Json;
use drills_core::{Answer, DrillsResult, DEFAULT_HISTORY_LIMIT};
use serde::Deserialize;

/// Runs a store-backed service call on the blocking pool. The file store does synchronous I/O
/// that must not stall the async workers.
async fn blocking<T, F>(call: F) -> Result<T, ApiError>
where
    F: FnOnce() -> DrillsResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| ApiError::Internal(format!("blocking task failed: {e}")))?
        .map_err(Into::into)
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler(state = AppState)]
pub(crate) async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/drills",
    responses(
        (status = 200, description = "All drills, newest first", body = ListDrillsRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List drill summaries.
///
/// Served from the drill-list cache while it is fresh.
#[axum::debug_handler]
pub(crate) async fn list_drills(
    State(state): State<AppState>,
) -> Result<Json<ListDrillsRes>, ApiError> {
    let drills = blocking(move || state.drills.list_drills()).await?;
    Ok(Json(ListDrillsRes {
        drills: drills.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/drills/{id}",
    params(("id" = String, Path, description = "Drill id")),
    responses(
        (status = 200, description = "The drill with its questions", body = DrillRes),
        (status = 404, description = "Drill not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Fetch one drill, including its questions.
#[axum::debug_handler]
pub(crate) async fn get_drill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DrillRes>, ApiError> {
    let drill = blocking(move || state.drills.get_drill(&id)).await?;
    Ok(Json(drill.into()))
}

#[utoipa::path(
    post,
    path = "/api/attempts",
    request_body = SubmitAttemptReq,
    params(
        ("x-api-key" = String, Header, description = "Shared secret of the trusted front end"),
        ("x-user-id" = String, Header, description = "Id of the signed-in user")
    ),
    responses(
        (status = 200, description = "Attempt scored and stored", body = SubmitAttemptRes),
        (status = 400, description = "Invalid input data", body = ErrorRes),
        (status = 401, description = "Not authenticated", body = ErrorRes),
        (status = 404, description = "Drill not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Submit answers to a drill.
///
/// Scores the answers by keyword matching and stores the attempt for the caller.
#[axum::debug_handler]
pub(crate) async fn submit_attempt(
    State(state): State<AppState>,
    CallerIdentity(user_id): CallerIdentity,
    AppJson(req): AppJson<SubmitAttemptReq>,
) -> Result<Json<SubmitAttemptRes>, ApiError> {
    let answers: Vec<Answer> = req.answers.into_iter().map(Into::into).collect();
    let submitted =
        blocking(move || state.attempts.submit(&user_id, &req.drill_id, answers)).await?;
    Ok(Json(submitted.into()))
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryQuery {
    limit: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/attempts",
    params(
        ("limit" = Option<usize>, Query, description = "Maximum number of attempts (1-100, default 5)"),
        ("x-api-key" = String, Header, description = "Shared secret of the trusted front end"),
        ("x-user-id" = String, Header, description = "Id of the signed-in user")
    ),
    responses(
        (status = 200, description = "The caller's recent attempts, newest first", body = ListAttemptsRes),
        (status = 400, description = "Invalid limit", body = ErrorRes),
        (status = 401, description = "Not authenticated", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List the caller's attempt history.
#[axum::debug_handler]
pub(crate) async fn list_attempts(
    State(state): State<AppState>,
    CallerIdentity(user_id): CallerIdentity,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ListAttemptsRes>, ApiError> {
    let limit = match query.limit.as_deref() {
        None => DEFAULT_HISTORY_LIMIT,
        Some(raw) => raw.trim().parse::<usize>().map_err(|_| ApiError::Validation {
            message: "Invalid input data",
            details: vec![format!("limit must be a positive integer (got '{raw}')")],
        })?,
    };

    let attempts = blocking(move || state.attempts.history(&user_id, limit)).await?;
    Ok(Json(ListAttemptsRes {
        attempts: attempts.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/me",
    params(
        ("x-api-key" = String, Header, description = "Shared secret of the trusted front end"),
        ("x-user-id" = String, Header, description = "Id of the signed-in user")
    ),
    responses(
        (status = 200, description = "The caller's profile", body = MeRes),
        (status = 401, description = "Not authenticated", body = ErrorRes),
        (status = 404, description = "User not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Return the caller's profile.
#[axum::debug_handler]
pub(crate) async fn me(
    State(state): State<AppState>,
    CallerIdentity(user_id): CallerIdentity,
) -> Result<Json<MeRes>, ApiError> {
    let user = blocking(move || state.users.get(&user_id)).await?;
    Ok(Json(user.into()))
}

/// Envelope for unknown routes.
pub(crate) async fn not_found() -> ApiError {
    ApiError::NotFound("Not found")
}
