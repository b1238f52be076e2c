//! Error types for stamina-server

use thiserror::Error;

/// Result type for stamina-server operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while starting the server
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Config(String),

    #[error("Invalid listen address '{0}'")]
    Addr(String),
}
