//! Notification request model.

use serde::{Deserialize, Serialize};

use super::error::NotifyError;

/// Ask the device at `address` to download `name`.
///
/// Accepted as either a JSON or a form-encoded body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyRequest {
    /// Host name or IP of the device. An explicit `host:port` socket address
    /// overrides the configured notification port.
    pub address: String,

    /// File name inside the data directory.
    pub name: String,
}

impl NotifyRequest {
    /// Create a new request.
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
        }
    }

    /// Check that both fields carry a value.
    pub fn validate(&self) -> Result<(), NotifyError> {
        if self.address.trim().is_empty() {
            return Err(NotifyError::invalid_request("address is required"));
        }
        if self.name.is_empty() {
            return Err(NotifyError::invalid_request("name is required"));
        }
        Ok(())
    }
}
