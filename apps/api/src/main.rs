mod auth;
mod config;
mod db;
mod errors;
mod feedback;
mod interviews;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::RedisSessionResolver;
use crate::config::Config;
use crate::db::create_pool;
use crate::feedback::generator::GeminiFeedbackGenerator;
use crate::interviews::generator::GeminiQuestionGenerator;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::{PgFeedbackStore, PgInterviewStore, PgUserStore};
use crate::store::UserStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mockview API v{}", env!("CARGO_PKG_VERSION"));

    // PostgreSQL document store
    let db = create_pool(&config.database_url).await?;
    let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(db.clone()));

    // Redis session lookup
    let redis = redis::Client::open(config.redis_url.clone())?;
    let sessions = RedisSessionResolver::connect(&redis, users.clone()).await?;
    info!("Redis session resolver connected");

    let llm = LlmClient::new(config.gemini_api_key.clone(), config.llm_timeout)?;
    info!(
        "LLM client initialized (model: {}, timeout: {:?})",
        llm_client::MODEL,
        config.llm_timeout
    );

    let state = AppState {
        interviews: Arc::new(PgInterviewStore::new(db.clone())),
        feedbacks: Arc::new(PgFeedbackStore::new(db)),
        users,
        sessions: Arc::new(sessions),
        question_generator: Arc::new(GeminiQuestionGenerator::new(llm.clone())),
        feedback_generator: Arc::new(GeminiFeedbackGenerator::new(llm)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
