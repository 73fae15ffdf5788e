mod config;
mod error;
mod handlers;
mod prompts;
mod routes;
mod state;
mod upstream;

use anyhow::Result;
use axum::Router;
use std::net::{IpAddr, SocketAddr};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lingo_relay=debug,tower_http=debug")),
        )
        .init();

    let config = Config::from_env()?;
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; /translate and /suggest-reply will fail");
    }
    if config.tts_api_key.is_none() {
        warn!("TTS_API_KEY is not set; /synthesize-speech will fail");
    }

    let host: IpAddr = config.bind_address.parse()?;
    let addr = SocketAddr::new(host, config.port);

    let app_state = AppState::new(config)?;

    // Build application
    let app = Router::new()
        .merge(routes::create_routes(app_state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
