use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, ServerConfig};
use drills_core::config::{cache_ttl_from_env_value, flag_from_env_value};
use drills_core::seed::builtin_drills;
use drills_core::{CoreConfig, DEFAULT_DATA_DIR, DEFAULT_DRILLS_CACHE_MAX_ENTRIES, FileStore};

const DEFAULT_LOG_DIRECTIVES: [&str; 4] = [
    "drills_run=info",
    "drills_core=info",
    "api_rest=info",
    "tower_http=info",
];

/// Main entry point for the interview drills service
///
/// Resolves configuration from the environment, opens the file-backed document store, optionally
/// seeds the built-in drills and serves the REST API until Ctrl-C.
///
/// # Environment Variables
/// - `DRILLS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `DRILLS_DATA_DIR`: Directory for drill, attempt and user documents (default: "drill_data")
/// - `DRILLS_API_KEY`: Shared secret expected in `x-api-key` (required)
/// - `DRILLS_CORS_ORIGIN`: Allowed browser origin (default: "http://localhost:3000")
/// - `DRILLS_CACHE_TTL_SECS`: Lifetime of the cached drill list (default: 60)
/// - `DRILLS_SEED_ON_START`: Seed the built-in drills at startup (default: false)
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in DEFAULT_LOG_DIRECTIVES {
        filter = filter.add_directive(directive.parse()?);
    }
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server_cfg = ServerConfig::from_env()?;

    let data_dir =
        std::env::var("DRILLS_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());
    let cache_ttl = cache_ttl_from_env_value(std::env::var("DRILLS_CACHE_TTL_SECS").ok())?;
    let seed_on_start = flag_from_env_value(std::env::var("DRILLS_SEED_ON_START").ok())?;

    let cfg = Arc::new(CoreConfig::new(
        PathBuf::from(data_dir),
        cache_ttl,
        DEFAULT_DRILLS_CACHE_MAX_ENTRIES,
    )?);
    let store = Arc::new(FileStore::open(cfg.clone())?);
    tracing::info!("++ Using data directory {}", store.data_dir().display());

    let state = AppState::new(store, &cfg, server_cfg.api_key());

    if seed_on_start {
        let outcome = state.drills.seed(builtin_drills()?)?;
        tracing::info!(
            created = outcome.created.len(),
            skipped = outcome.skipped.len(),
            "++ Seeded built-in drills"
        );
    }

    api_rest::serve(&server_cfg, state).await
}
