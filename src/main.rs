use anyhow::Result;
use tracing::info;
use translation_gateway::{config::Config, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Load configuration from environment
    let config = Config::from_env()?;

    // Initialize logging; DEBUG=true raises the default verbosity
    let level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("translation_gateway={}", level).parse()?)
                .add_directive(format!("tower_http={}", level).parse()?),
        )
        .init();

    info!("Starting translation API on port {}", config.port);

    let state = server::AppState::from_config(config)?;
    server::serve(state).await
}
