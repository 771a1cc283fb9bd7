pub mod alerts;
pub mod config;
pub mod metrics;
pub mod remediation;
pub mod server;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Payload parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to launch remediation process: {0}")]
    Launch(#[source] std::io::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
