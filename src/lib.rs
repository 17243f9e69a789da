//! FBI Remote Installer
//!
//! A small LAN daemon that stores 3DS installer packages in a directory,
//! serves them over HTTP, and tells a console running FBI to pull one.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, path confinement, server state
//!   and the HTTP transport
//! - **domains**: business logic organized by bounded contexts
//!   - **catalog**: listing of the data directory
//!   - **storage**: confined package reads, writes and deletes
//!   - **notify**: the one-shot TCP notification sent to devices
//!
//! # Example
//!
//! ```rust,no_run
//! use fbi_remote_installer::core::{Config, HttpTransport, InstallerServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = InstallerServer::new(config.clone())?;
//!     HttpTransport::new(config.http).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, InstallerServer, Result};
