//! Storage domain module.
//!
//! Reads, writes and removes package bytes in the data directory. Every
//! operation takes a user-supplied name and resolves it through a
//! [`PathGuard`](crate::core::security::PathGuard) before touching the
//! filesystem.

mod error;
mod extensions;
mod file_store;

pub use error::StorageError;
pub use extensions::{ACCEPTED_EXTENSIONS, is_accepted_package};
pub use file_store::{FileStore, OpenedFile};
