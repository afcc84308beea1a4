use anyhow::Result;
use cardwallet::config::AppConfig;
use cardwallet::server::ServerBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load(std::env::args().nth(1))?;

    let default_filter = config.log_level.clone().unwrap_or_else(|| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    tracing::debug!(?config, "configuration loaded");

    ServerBuilder::new().with_config(config).serve().await
}
