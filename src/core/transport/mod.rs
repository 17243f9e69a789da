//! Transport layer for the installer daemon.
//!
//! The daemon speaks plain HTTP:
//! - **http**: axum router, listener and request lifecycle
//! - **handlers**: one handler per API route
//! - **extract** / **response**: request body parsing and status replies

mod config;
mod error;
mod extract;
mod handlers;
pub mod http;
mod response;

pub use config::{HttpConfig, parse_listen};
pub use error::{TransportError, TransportResult};
pub use extract::JsonOrForm;
pub use http::{AppState, HttpTransport, build_router};
pub use response::ApiMessage;
