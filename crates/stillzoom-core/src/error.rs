//! Error types for StillZoom.

use thiserror::Error;

/// Main error type for StillZoom operations.
#[derive(Error, Debug)]
pub enum StillZoomError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Decoder error: {0}")]
    Decoder(String),

    #[error("Encoder error: {0}")]
    Encoder(String),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

/// Result type alias for StillZoom operations.
pub type Result<T> = std::result::Result<T, StillZoomError>;
