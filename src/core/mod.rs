//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the daemon,
//! including error handling, configuration, path confinement, the shared
//! server state and the HTTP transport.

pub mod config;
pub mod error;
pub mod security;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use security::{PathGuard, PathSecurityError};
pub use server::InstallerServer;
pub use transport::{HttpConfig, HttpTransport};
