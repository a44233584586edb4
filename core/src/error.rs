//! Error types for the task list client.
//!
//! # Design
//! The controller never lets an `ApiError` escape to the user as anything but
//! a message, so the variants only need to distinguish where the failure came
//! from: the transport, the HTTP status, or the shape of the payload.

use thiserror::Error;

/// Errors returned by `TasksApi` parse methods and by `Transport`s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-2xx status. `detail` carries the
    /// server-provided explanation when the body had one.
    #[error("HTTP error! status: {status}")]
    Http { status: u16, detail: Option<String> },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The input was rejected locally and no request was sent.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Text shown to the user: the server's `detail` when present, the
    /// `Display` form otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http {
                detail: Some(detail),
                ..
            } => detail.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status of the failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while reading `ClientConfig` from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unsupported locale: {0}")]
    UnknownLocale(String),

    #[error("origin must start with http:// or https://, got {0:?}")]
    InvalidOrigin(String),
}
