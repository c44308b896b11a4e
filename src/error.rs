use thiserror::Error;

/// Message shown to the user for any failed transform attempt.
pub const TRANSFORM_FAILED_MESSAGE: &str = "Transformation failed. Please try again.";

/// Errors raised while accepting an uploaded garment image.
#[derive(Error, Debug)]
pub enum IngestError {
    /// No bytes were supplied.
    #[error("No image was provided")]
    Empty,

    /// The upload exceeds the configured size bound.
    #[error("Image is {size} bytes, larger than the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    /// The bytes are not a recognised image format.
    #[error("Unsupported image format")]
    UnsupportedFormat,

    /// The file could not be read.
    #[error("Failed to read image {0}: {1}")]
    Read(String, String),
}

/// Errors in service configuration, detected before any remote call.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No API key configured (set RETHREAD_API_KEY or GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Errors from a single transform attempt against the generation service.
///
/// The workflow collapses all of these into [`TRANSFORM_FAILED_MESSAGE`];
/// the variants exist for logging.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Cannot connect to image service at {0}: {1}")]
    Connection(String, String),

    #[error("Image service returned HTTP {0}: {1}")]
    Http(u16, String),

    #[error("Invalid response from image service: {0}")]
    InvalidResponse(String),

    #[error("Image service returned no image: {0}")]
    NoImage(String),
}

/// Crate-level error.
#[derive(Error, Debug)]
pub enum RethreadError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    /// The generated image payload was not valid base64.
    #[error("Generated image is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, RethreadError>;
