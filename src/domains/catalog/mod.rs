//! Catalog domain module.
//!
//! The catalog is the live listing of packages in the data directory. Nothing
//! is cached: every call rescans the directory, so the filesystem is the only
//! source of truth.

mod entry;
mod error;
mod service;

pub use entry::CatalogEntry;
pub use error::CatalogError;
pub use service::Catalog;
