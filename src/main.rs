//! Mock Interviewer - scripted technical interview API
//!
//! Runs a single interview session per process: an optional resume upload,
//! then a chat with an interviewer agent that walks a fixed question script,
//! alongside a scratch code buffer.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod conversation;
mod core;
mod routes;

use crate::config::Config;
use crate::core::{ScriptedAgent, SessionController};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionController>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mock_interviewer=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let script = Arc::new(config.load_script().await?);
    tracing::info!(
        "📋 Interview script ready: {} prompts, {}ms thinking delay",
        script.len(),
        config.thinking_delay_ms
    );

    let agent = ScriptedAgent::new(script).with_thinking_delay(config.thinking_delay());
    let session = Arc::new(SessionController::new(agent).with_position(config.position.clone()));

    let state = AppState { session };

    let app = Router::new()
        .merge(routes::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("🎤 Interviewer running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
