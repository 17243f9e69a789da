//! Error types and handling for the installer daemon.
//!
//! This module defines a unified error type that wraps every domain error and
//! maps it onto an HTTP status: bad client input is a 400, a missing file a
//! 404, and filesystem failures a 500. Notification failures happen after
//! the response is sent and only ever reach the logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use super::security::PathSecurityError;
use super::transport::ApiMessage;
use crate::domains::catalog::CatalogError;
use crate::domains::notify::NotifyError;
use crate::domains::storage::{ACCEPTED_EXTENSIONS, StorageError};

/// A specialized Result type for daemon operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the daemon.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the catalog domain.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Error originating from the storage domain.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Error originating from the notify domain.
    #[error("Notify error: {0}")]
    Notify(#[from] NotifyError),

    /// A name failed path confinement.
    #[error("Path error: {0}")]
    PathSecurity(#[from] PathSecurityError),

    /// Malformed request that no domain got to see.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors outside any domain operation.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new bad request error.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::PathSecurity(_) => StatusCode::BAD_REQUEST,
            Self::Storage(StorageError::UnsupportedExtension(_) | StorageError::InvalidPath(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Notify(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client, if any.
    ///
    /// Server errors carry no body so paths and OS errors stay in the logs.
    pub fn client_message(&self) -> Option<String> {
        match self {
            Self::BadRequest(msg) => Some(msg.clone()),
            Self::PathSecurity(_) | Self::Storage(StorageError::InvalidPath(_)) => {
                Some("wrong filepath".to_string())
            }
            Self::Storage(StorageError::UnsupportedExtension(_)) => Some(format!(
                "filename must end with {}",
                ACCEPTED_EXTENSIONS.join(", ")
            )),
            Self::Storage(StorageError::NotFound(_)) => Some("file not found".to_string()),
            Self::Notify(e) if e.is_client_error() => Some(e.to_string()),
            _ => None,
        }
    }
}

impl From<&Error> for ApiMessage {
    fn from(err: &Error) -> Self {
        ApiMessage {
            status: err.status_code(),
            message: err.client_message(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let reply = ApiMessage::from(&self);
        if reply.status.is_server_error() {
            error!("{}", self);
        }
        reply.into_response()
    }
}
