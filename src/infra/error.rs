//! Error types for evidence-record verification.
//! Error handling types and result definitions shared across the crate.

use thiserror::Error;

/// Result type for verification operations
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Error types for operations that cannot be expressed as per-node findings.
///
/// Note: cryptographic mismatches discovered during validation are never
/// raised through this type; they are recorded in the node's report so a
/// failure at one node cannot hide the state of its siblings. These variants
/// cover the run-fatal and infrastructure cases only.
#[derive(Error, Debug, miette::Diagnostic)]
pub enum VerifyError {
    #[error("Structural error: {0}")]
    StructuralError(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Digest computation error: {0}")]
    DigestError(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<std::io::Error> for VerifyError {
    fn from(error: std::io::Error) -> Self {
        VerifyError::IoError(error.to_string())
    }
}

impl From<toml::de::Error> for VerifyError {
    fn from(error: toml::de::Error) -> Self {
        VerifyError::ConfigurationError(error.to_string())
    }
}

impl From<toml::ser::Error> for VerifyError {
    fn from(error: toml::ser::Error) -> Self {
        VerifyError::ConfigurationError(error.to_string())
    }
}
