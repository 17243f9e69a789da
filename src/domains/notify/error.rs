//! Notification error types.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while notifying a device.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The notification request is missing a field.
    #[error("Invalid notify request: {0}")]
    InvalidRequest(String),

    /// The download URL could not be encoded.
    #[error("Failed to encode download URL: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    /// The URL does not fit in a 32-bit length prefix.
    #[error("Payload of {0} bytes exceeds the frame limit")]
    PayloadTooLarge(usize),

    /// The device did not accept the connection in time.
    #[error("Timed out after {timeout:?} connecting to {target}")]
    ConnectTimeout { target: String, timeout: Duration },

    /// The TCP connection could not be established.
    #[error("Failed to open TCP connection to {target}: {source}")]
    Connect {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// The frame could not be written.
    #[error("Failed to write data to {target}: {source}")]
    Write {
        target: String,
        #[source]
        source: std::io::Error,
    },
}

impl NotifyError {
    /// Create a new "invalid request" error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Whether this error stems from bad client input rather than the network.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}
