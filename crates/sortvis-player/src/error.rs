//! Error types for sortvis-player.

use thiserror::Error;

/// Result type for sortvis-player operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the player, its configuration and its server.
///
/// Navigation never fails; only input and environment problems end up here.
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before trace generation.
    #[error(transparent)]
    Trace(#[from] sortvis_trace::Error),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
