//! Error types for the Robopost client.
//!
//! # Design
//! Local file problems, transport failures and schema violations are kept
//! apart so callers can tell "my file is missing" from "the server said no"
//! from "the server answered something we cannot read". Non-2xx responses
//! carry the raw status code and body for debugging.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by `RobopostClient` operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The local file handed to `upload_media` could not be opened or read.
    #[error("cannot read upload file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The HTTP round-trip failed or returned a non-2xx status.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body does not match the expected schema.
    #[error("response failed validation: {0}")]
    Validation(String),

    /// The request was rejected locally, before any network call.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// HTTP status of a rejected response, if this error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport(TransportError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection, TLS, timeout or body-read failure.
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid value: {0}")]
    Invalid(String),
}

/// A string that is not one of an enum's declared literals.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} literal: {value:?}")]
pub struct ParseLiteralError {
    pub kind: &'static str,
    pub value: String,
}

impl From<ParseLiteralError> for ApiError {
    fn from(err: ParseLiteralError) -> Self {
        ApiError::InvalidRequest(err.to_string())
    }
}
