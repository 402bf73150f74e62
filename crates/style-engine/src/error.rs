//! Error types for style resolution.

use symbology_common::{SymbologyError, SymbologyKind};
use thiserror::Error;

/// Errors that can occur while resolving styles or loading engine config.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The symbology itself is malformed or unsupported.
    #[error(transparent)]
    Symbology(#[from] SymbologyError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The symbology is not drawn with per-feature vector styles.
    #[error("{0} symbologies are not styled per feature")]
    NotStylable(SymbologyKind),

    /// The symbology cannot drive a raster source.
    #[error("{0} symbologies cannot drive a raster source")]
    NotRaster(SymbologyKind),

    /// Unparseable or inverted time token.
    #[error("invalid time: {0}")]
    InvalidTime(String),

    /// Storage/IO error.
    #[error("io error: {0}")]
    Io(String),
}

impl EngineError {
    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for EngineError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
