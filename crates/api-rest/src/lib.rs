//! # API REST
//!
//! REST API implementation for the interview drills service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON errors, caller identity, CORS, security headers)
//!
//! Uses `api-shared` for wire types and `drills-core` for everything else.

#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod extract;
mod handlers;

pub use config::ServerConfig;
pub use error::ApiError;
pub use extract::CallerIdentity;

use api_shared::auth::{API_KEY_HEADER, USER_ID_HEADER};
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use drills_core::{AttemptService, CoreConfig, DocumentStore, DrillService, UserService};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub drills: DrillService,
    pub attempts: AttemptService,
    pub users: UserService,
    api_key: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, cfg: &CoreConfig, api_key: &str) -> Self {
        Self {
            drills: DrillService::from_config(store.clone(), cfg),
            attempts: AttemptService::new(store.clone()),
            users: UserService::new(store),
            api_key: Arc::from(api_key),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_drills,
        handlers::get_drill,
        handlers::submit_attempt,
        handlers::list_attempts,
        handlers::me,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::DifficultyRes,
        api_shared::DrillSummaryRes,
        api_shared::ListDrillsRes,
        api_shared::QuestionRes,
        api_shared::DrillRes,
        api_shared::AnswerReq,
        api_shared::SubmitAttemptReq,
        api_shared::ScoreDetailRes,
        api_shared::SubmitAttemptRes,
        api_shared::AttemptDrillRes,
        api_shared::AttemptSummaryRes,
        api_shared::ListAttemptsRes,
        api_shared::MeRes,
        api_shared::ErrorCode,
        api_shared::ErrorBody,
        api_shared::ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Builds the full application: API routes, Swagger UI and the middleware stack.
pub fn router(state: AppState, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(API_KEY_HEADER),
            HeaderName::from_static(USER_ID_HEADER),
        ]);

    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("permissions-policy"),
            HeaderValue::from_static("camera=(), microphone=(), geolocation=()"),
        ));

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/drills", get(handlers::list_drills))
        .route("/api/drills/:id", get(handlers::get_drill))
        .route(
            "/api/attempts",
            get(handlers::list_attempts).post(handlers::submit_attempt),
        )
        .route("/api/me", get(handlers::me))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(handlers::not_found)
        .layer(security_headers)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `cfg.rest_addr()` and serves until Ctrl-C.
pub async fn serve(cfg: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let app = router(state, cfg.cors_origin().clone());

    let listener = tokio::net::TcpListener::bind(cfg.rest_addr()).await?;
    tracing::info!("++ Starting drills REST API on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- REST API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
