//! Sync Errors
//!
//! Failures are recoverable: they degrade to an incomplete list or a stale
//! remote copy, never to a dead session. Stale page responses are not
//! errors and never show up here.

use thiserror::Error;

/// Errors produced by the engine and its gateways
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Page fetch or hydration query failed
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// State persistence mutation failed; the local copy stays authoritative
    #[error("persist failed: {0}")]
    Persist(String),

    /// A drag move referenced a row that is not loaded
    #[error("invalid move {from} -> {to} over {len} items")]
    InvalidMove { from: usize, to: usize, len: usize },

    /// Gateway payload could not be decoded
    #[error("decode error: {0}")]
    Decode(String),

    /// Rejected configuration value
    #[error("invalid config: {0}")]
    Config(String),
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Decode(err.to_string())
    }
}

/// Result type for list sync operations
pub type Result<T> = std::result::Result<T, SyncError>;
