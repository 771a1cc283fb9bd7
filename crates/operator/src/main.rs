use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use remediation_operator::{
    alerts::AlertMatcher,
    config::Config,
    remediation::PlaybookExecutor,
    server::Server,
    Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::load()?;
    info!("Loaded configuration: {:?}", config);

    // Build the per-process collaborators: the matcher and the fixed
    // remediation request, constructed once and shared read-only.
    let matcher = AlertMatcher::new(&config.remediation.target_alert);
    let executor = Arc::new(PlaybookExecutor::new(
        config.remediation.to_request(),
        config.remediation.timeout(),
    ));

    // Initialize server
    let server = Server::new(matcher, executor);

    // Start server
    info!("Starting server on {}", config.server.addr);
    server.start(&config.server.addr).await?;

    Ok(())
}
