//! Notify domain module.
//!
//! Tells a remote device to pull a package over HTTP. The device listens on a
//! TCP port and expects exactly one frame:
//!
//! ```text
//! +----------------------+------------------------+
//! | length: u32 (BE)     | URL bytes (UTF-8)      |
//! +----------------------+------------------------+
//! ```
//!
//! The connection is closed right after the write. Nothing is read back, so a
//! successful send only means the bytes left this host.

mod client;
mod error;
mod protocol;
mod request;

pub use client::NotifierClient;
pub use error::NotifyError;
pub use protocol::{DOWNLOAD_PATH, build_download_url, effective_base_url, encode_frame};
pub use request::NotifyRequest;
