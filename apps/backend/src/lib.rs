pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use lingodeck_core::{Sm2, SpacedRepetitionAlgorithm};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::{CardStore, MemoryDatabase};
use crate::services::sessions::SessionRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn CardStore>,
    pub algorithm: Arc<dyn SpacedRepetitionAlgorithm>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// State over the given store, scheduling with default SM-2 parameters.
    pub fn new(db: Arc<dyn CardStore>) -> Self {
        Self {
            db,
            algorithm: Arc::new(Sm2::default()),
            sessions: Arc::new(SessionRegistry::new()),
        }
    }

    /// Drop study sessions idle for longer than `ttl`.
    pub fn with_session_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.sessions = Arc::new(SessionRegistry::with_ttl(ttl));
        self
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Deck routes
        .route("/api/decks", get(routes::decks::list).post(routes::decks::create))
        .route(
            "/api/decks/:id",
            get(routes::decks::get).delete(routes::decks::delete),
        )
        .route("/api/decks/:id/stats", get(routes::decks::stats))
        // Card routes
        .route(
            "/api/decks/:id/cards",
            get(routes::cards::list).post(routes::cards::create),
        )
        .route(
            "/api/cards/:id",
            put(routes::cards::update).delete(routes::cards::delete),
        )
        // Study routes
        .route("/api/decks/:id/due", get(routes::study::due))
        .route("/api/study/review", post(routes::study::review))
        // Session routes
        .route("/api/sessions", post(routes::sessions::start))
        .route(
            "/api/sessions/:id",
            get(routes::sessions::get).delete(routes::sessions::end),
        )
        .route("/api/sessions/:id/answer", post(routes::sessions::answer))
        .route("/api/sessions/:id/restart", post(routes::sessions::restart))
        // Stats routes
        .route("/api/stats", get(routes::stats::overall))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Initializing in-memory card store...");
    let state = AppState::new(Arc::new(MemoryDatabase::new())).with_session_ttl(config.session_ttl());

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
