//! Error types for symbology decoding and evaluation.

use thiserror::Error;

/// Result type alias using SymbologyError.
pub type Result<T> = std::result::Result<T, SymbologyError>;

/// Errors raised while decoding symbologies or evaluating their inputs.
#[derive(Debug, Error)]
pub enum SymbologyError {
    // === Decode Errors ===
    #[error("Unsupported symbology type: {0}")]
    UnsupportedVariant(String),

    #[error("Missing field '{field}' for {variant} symbology")]
    MissingField { field: String, variant: String },

    #[error("Invalid symbology dictionary: {0}")]
    InvalidDict(String),

    // === Recoverable Errors ===
    #[error("Cannot build colorizer: {0}")]
    MissingColorizer(String),

    #[error("Invalid value for attribute '{attribute}': {reason}")]
    InvalidAttributeValue { attribute: String, reason: String },

    #[error("IO error: {0}")]
    Io(String),
}

impl SymbologyError {
    /// Create a MissingField error.
    pub fn missing_field(field: impl Into<String>, variant: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            variant: variant.into(),
        }
    }

    /// Create an InvalidDict error.
    pub fn invalid_dict(msg: impl Into<String>) -> Self {
        Self::InvalidDict(msg.into())
    }

    /// Create an InvalidAttributeValue error.
    pub fn invalid_attribute(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAttributeValue {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    /// Whether rendering can continue with a fallback value.
    ///
    /// Decode errors are fatal to the symbology being built; colorizer and
    /// attribute errors only affect a single colorizer or feature.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SymbologyError::MissingColorizer(_) | SymbologyError::InvalidAttributeValue { .. }
        )
    }
}

impl From<std::io::Error> for SymbologyError {
    fn from(err: std::io::Error) -> Self {
        SymbologyError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SymbologyError {
    fn from(err: serde_json::Error) -> Self {
        SymbologyError::InvalidDict(format!("JSON error: {}", err))
    }
}
