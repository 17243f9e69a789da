//! Catalog entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::Metadata;

/// A snapshot of one file in the data directory at listing time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// File name relative to the data directory.
    pub name: String,

    /// Size in bytes.
    pub size: u64,

    /// Last modification time, in seconds since the Unix epoch.
    pub mod_time: i64,
}

impl CatalogEntry {
    /// Build an entry from a file name and its metadata.
    ///
    /// Platforms that cannot report a modification time yield `0`.
    pub fn from_metadata(name: impl Into<String>, metadata: &Metadata) -> Self {
        let mod_time = metadata
            .modified()
            .map(|t| DateTime::<Utc>::from(t).timestamp())
            .unwrap_or_default();

        Self {
            name: name.into(),
            size: metadata.len(),
            mod_time,
        }
    }
}
