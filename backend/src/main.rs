//! HTTP API serving normalized VyomGarud posts and categories.

mod config;
mod handlers;
mod request_trace;
mod routes;
mod state;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Default to info-level logs; override via RUST_LOG if needed.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = config::ServerConfig::from_env()?;
    tracing::info!("Starting VyomGarud content API");
    tracing::info!("Content source: {:?}", config.source);
    tracing::info!("Render mode: {}", config.render_mode);

    let app_state = state::AppState::from_config(&config)?;
    tracing::info!("Serving content from the {} source", app_state.source().name());

    let app = routes::create_router(app_state);

    let addr = config.listen_addr();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
