/// Error types for the crop stress library
use thiserror::Error;

/// Main error type for stress data operations
#[derive(Error, Debug)]
pub enum StressError {
    /// Payload shape or content is not usable for aggregation
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// HTTP request failed before a response arrived
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Bad response status from {url}: {status}")]
    HttpStatus { url: String, status: u16 },

    /// Unknown crop name
    #[error("Unknown crop: {0}")]
    UnknownCrop(String),

    /// Reading a saved payload failed
    #[error("Failed to read payload: {0}")]
    Io(#[from] std::io::Error),
}

impl StressError {
    pub fn malformed(message: impl Into<String>) -> Self {
        StressError::MalformedInput(message.into())
    }

    /// Returns true for payload shape errors, as opposed to transport errors.
    pub fn is_malformed(&self) -> bool {
        matches!(self, StressError::MalformedInput(_))
    }
}

impl From<serde_json::Error> for StressError {
    fn from(value: serde_json::Error) -> Self {
        StressError::MalformedInput(value.to_string())
    }
}

/// Type alias for Results using StressError
pub type Result<T> = std::result::Result<T, StressError>;
