//! Error types for the glide-range engine.

use thiserror::Error;

/// Result alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, GlideError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GlideError {
    /// A numeric request field is missing, non-finite, or out of range.
    #[error("invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    /// A center location cannot be sampled.
    #[error("invalid location '{name}': {message}")]
    InvalidLocation { name: String, message: String },

    #[error("invalid altitude bands: {0}")]
    InvalidBands(String),

    #[error("unknown ring spacing '{0}'")]
    UnknownRingSpacing(String),

    #[error("unparseable elevation '{0}'")]
    InvalidElevation(String),

    #[error("glider '{0}' not found in catalog")]
    UnknownGlider(String),

    #[error("no center locations selected")]
    NoLocations,
}

impl GlideError {
    pub(crate) fn input(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }
}
