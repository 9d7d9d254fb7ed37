mod auth;
mod config;
mod db;
mod documents;
mod errors;
mod extract;
mod jobs;
mod linkedin;
mod llm_client;
mod matching;
mod process;
mod routes;
mod state;
#[cfg(test)]
mod test_support;
mod users;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::TokenService;
use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::documents::DocumentService;
use crate::jobs::PgJobStore;
use crate::linkedin::ScraperClient;
use crate::llm_client::LlmClient;
use crate::process::ExternalCommand;
use crate::routes::build_router;
use crate::state::AppState;
use crate::users::PgUserStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobtrack v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.database_max_connections).await?;
    run_migrations(&db).await?;

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_model.clone(),
        &config.openai_base_url,
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    // External tools
    let documents = DocumentService::new(
        ExternalCommand::parse(&config.document_read_command)?,
        ExternalCommand::parse(&config.document_replace_command)?,
    )?;
    let scraper = ScraperClient::new(ExternalCommand::parse(&config.scraper_command)?);

    let state = AppState {
        jobs: Arc::new(PgJobStore::new(db.clone())),
        users: Arc::new(PgUserStore::new(db)),
        tokens: TokenService::new(&config.jwt_secret, config.token_ttl_hours),
        llm,
        documents,
        scraper,
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
