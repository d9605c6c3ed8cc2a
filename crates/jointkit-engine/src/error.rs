//! Error types for the generation engine
//!
//! Business-rule problems (thin walls, loose fits, missing parts) are never
//! errors here. They come back as validation findings. These types cover
//! requests the engine cannot process at all.

use thiserror::Error;

/// Parameter errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// Value is NaN or infinite
    #[error("Parameter '{name}' is not a finite number")]
    NotFinite { name: String },

    /// Value outside the range the engine can compute with
    #[error("Parameter '{name}' out of range: {value} (expected {min} to {max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Main engine error type
#[derive(Error, Debug)]
pub enum EngineError {
    /// Template id not in the library
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// Malformed parameter
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// Metadata serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    /// Create an out-of-range parameter error
    pub fn out_of_range(name: &str, value: f64, min: f64, max: f64) -> Self {
        EngineError::Parameter(ParameterError::OutOfRange {
            name: name.to_string(),
            value,
            min,
            max,
        })
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
