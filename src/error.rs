//! Error types for synostat

use std::io;
use thiserror::Error;

/// Result type alias for synostat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the exporter surface.
///
/// The sampling core itself never fails: unreadable attributes and an
/// unreadable block directory degrade to zero values and an empty disk
/// list. Errors only arise in the wiring around it (metric registration,
/// serialization, the HTTP endpoint).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Metric registration or encoding error
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Malformed listen address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}
