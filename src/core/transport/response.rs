//! Status-plus-message replies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// A reply carrying a status code and an optional human-readable message.
///
/// Without a message the response is the bare status; with one it is
/// `{"message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiMessage {
    pub status: StatusCode,
    pub message: Option<String>,
}

#[derive(Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

impl ApiMessage {
    /// A reply with only a status.
    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            message: None,
        }
    }

    /// A reply with a status and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
        }
    }

    /// A 200 reply with a message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, message)
    }
}

impl IntoResponse for ApiMessage {
    fn into_response(self) -> Response {
        match self.message {
            Some(ref message) => (self.status, Json(MessageBody { message })).into_response(),
            None => self.status.into_response(),
        }
    }
}
