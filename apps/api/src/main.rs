mod advice;
mod config;
mod errors;
mod llm_client;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::OllamaClient;
use crate::resume::taxonomy::KeywordTaxonomy;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Assistant API v{}", env!("CARGO_PKG_VERSION"));

    // Load the keyword taxonomy once; it is read-only for the process
    // lifetime. A missing or malformed file is not fatal.
    let taxonomy = Arc::new(KeywordTaxonomy::load(&config.job_keywords_path));
    if taxonomy.is_empty() {
        info!(
            "no keyword taxonomy at {}; keyword scoring will contribute zero",
            config.job_keywords_path
        );
    } else {
        info!("keyword taxonomy loaded: {} job titles", taxonomy.len());
    }

    // Initialize the local model client
    let llm = OllamaClient::new(
        config.ollama_url.clone(),
        config.ollama_model.clone(),
        config.llm_timeout_secs,
    );
    info!("LLM client initialized (model: {})", llm.model());

    let state = AppState {
        llm: Arc::new(llm),
        taxonomy,
        config: config.clone(),
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
