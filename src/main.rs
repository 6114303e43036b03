mod config;
mod errors;
mod handlers;
mod middleware;
mod models;
mod services;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn,
};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing::Level;
use crate::{
    config::{Config, Profile},
    services::{shutdown_signal, AdminStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    let level = if config.server.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    tracing::info!(
        "Starting with {} profile (debug: {}, session backend: {})",
        config.profile.name(),
        config.server.debug,
        config.session.session_type,
    );
    if config.profile == Profile::Production && config.uses_placeholder_secret() {
        tracing::warn!("SECRET_KEY is not set, using the placeholder secret");
    }

    let store = AdminStore::open(&config.storage)
        .with_context(|| format!("Failed to open roster {}", config.storage.csv_file_path))?;

    // Cleared on every way out of main, including errors below
    let _reset = store.reset_on_drop();

    let app = app(&config, store);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

fn app(config: &Config, store: AdminStore) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.session.cookie_secure)
        .with_http_only(config.session.cookie_http_only)
        .with_same_site(config.session.same_site.into())
        .with_name("session")
        .with_expiry(Expiry::OnInactivity(time::Duration::seconds(
            config.session.lifetime_secs as i64,
        )));

    let mut router = Router::new()
        // Roster routes
        .route("/save_admin", post(handlers::save_admin))
        .route("/load_admins", get(handlers::load_admins))

        // Index document, src and static trees
        .merge(handlers::asset_routes(&config.assets));

    if config.security.csrf_enabled {
        router = router.layer(from_fn(middleware::require_same_origin));
    }

    router
        .layer(session_layer)
        // Request size limit from config, enforced by the body extractors so
        // oversized payloads still get a JSON error body
        .layer(DefaultBodyLimit::max(config.upload.max_content_length))
        .with_state(store)
}
