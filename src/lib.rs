pub mod api; // HTTP boundary: /analyze, /health
pub mod config;
pub mod pipeline; // sanitizer, prompts, PDF text, model client

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use crate::api::{start_server_on, ApiContext};
use crate::config::AnalyzerConfig;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter. A second call is a no-op.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}

/// Load config, serve until ctrl-c, then shut down gracefully.
pub async fn run() -> Result<(), String> {
    init_tracing();

    let config = AnalyzerConfig::from_env().map_err(|e| e.to_string())?;
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    tracing::debug!(?config, "Loaded configuration");

    if config.api_key.is_none() {
        tracing::warn!("OPENROUTER_API_KEY is not set; /analyze will answer 500");
    }

    let addr = SocketAddr::new(config.bind_addr, config.port);
    let ctx = ApiContext::from_config(config).map_err(|e| e.to_string())?;
    let mut server = start_server_on(ctx, addr).await?;

    tracing::info!("Server running at http://{}", server.session.server_addr);

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed to listen for ctrl-c: {e}"))?;

    server.shutdown();
    server.join().await;
    Ok(())
}
