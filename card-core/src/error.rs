//! Error types for card editor operations.
//!
//! The mutation API itself never fails; these errors come from the edges
//! of the core (template lookup, image intake, serialization, config).

use thiserror::Error;

/// Result type for card editor operations.
pub type CardResult<T> = Result<T, CardError>;

/// Errors that can occur outside the mutation API.
#[derive(Debug, Error)]
pub enum CardError {
    /// No template is registered under the requested id.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// File bytes handed to image intake are not a recognised image.
    #[error("Invalid image payload: {0}")]
    InvalidImage(String),

    /// Configuration could not be parsed or is out of range.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Reading a file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// State or operation serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
