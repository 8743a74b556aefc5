//! Error types for s3mgr-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.
//! Failures reported by the storage provider keep the provider's own error code,
//! so callers can branch on it without parsing messages.

use thiserror::Error;

/// Result type alias for s3mgr-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for s3mgr-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid path format
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Invalid argument for an operation (bucket name, storage class, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Alias not found
    #[error("Alias not found: {0}")]
    AliasNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The storage provider rejected the request
    #[error("{code}: {message}")]
    Service {
        /// Provider error code, e.g. `NoSuchBucket`
        code: String,
        /// Provider error message
        message: String,
    },

    /// Request never produced a provider response (dispatch, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Build a provider error from its code and message
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Service {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Provider error code, if the failure came from the storage provider
    pub fn code(&self) -> Option<&str> {
        match self {
            Error::Service { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidPath(_) | Error::InvalidArgument(_) | Error::InvalidUrl(_) => 2,
            Error::Config(_) => 2,
            Error::Network(_) => 3,
            Error::AliasNotFound(_) => 5,
            Error::Service { code, .. } => match code.as_str() {
                "AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch"
                | "ExpiredToken" | "AllAccessDisabled" => 4,
                "NoSuchBucket" | "NoSuchKey" | "NotFound" => 5,
                "BucketAlreadyExists"
                | "BucketAlreadyOwnedByYou"
                | "BucketNotEmpty"
                | "InvalidObjectState"
                | "RestoreAlreadyInProgress"
                | "OperationAborted" => 6,
                "SlowDown" | "ServiceUnavailable" | "InternalError" | "RequestTimeout" => 3,
                _ => 1,
            },
            _ => 1,
        }
    }
}
