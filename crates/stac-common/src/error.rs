//! Error types for the coherence STAC tooling.

use thiserror::Error;

use crate::polarization::PolarizationParseError;
use crate::season::SeasonParseError;
use crate::tile::TileParseError;

/// Result type alias using StacError.
pub type StacResult<T> = Result<T, StacError>;

/// Primary error type. Every variant is fatal for one unit of work only.
#[derive(Debug, Error)]
pub enum StacError {
    // === Input Errors ===
    #[error("Malformed input: {0}")]
    Format(String),

    #[error("Unknown lookup key: {0}")]
    Lookup(String),

    // === Output Errors ===
    #[error("Publishing {id} failed with HTTP {status}: {message}")]
    Transport {
        id: String,
        status: u16,
        message: String,
    },

    #[error("Failed to persist: {0}")]
    Persistence(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StacError {
    /// Short, stable code for failure reports.
    pub fn kind(&self) -> &'static str {
        match self {
            StacError::Format(_) => "format",
            StacError::Lookup(_) => "lookup",
            StacError::Transport { .. } => "transport",
            StacError::Persistence(_) => "persistence",
            StacError::Storage(_) => "storage",
            StacError::Serialization(_) => "serialization",
            StacError::InvalidConfig(_) => "config",
        }
    }
}

impl From<TileParseError> for StacError {
    fn from(err: TileParseError) -> Self {
        StacError::Format(err.to_string())
    }
}

impl From<PolarizationParseError> for StacError {
    fn from(err: PolarizationParseError) -> Self {
        StacError::Format(err.to_string())
    }
}

impl From<SeasonParseError> for StacError {
    fn from(err: SeasonParseError) -> Self {
        StacError::Lookup(err.to_string())
    }
}

impl From<std::io::Error> for StacError {
    fn from(err: std::io::Error) -> Self {
        StacError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for StacError {
    fn from(err: serde_json::Error) -> Self {
        StacError::Serialization(format!("JSON error: {}", err))
    }
}
