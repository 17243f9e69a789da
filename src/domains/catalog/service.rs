//! Catalog service implementation.
//!
//! Lists the direct children of the data directory. Per-entry failures are
//! logged and the entry is dropped, so one unreadable file never hides the
//! rest of the listing.

use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument, warn};

use super::entry::CatalogEntry;
use super::error::CatalogError;

/// Service for listing the packages stored in the data directory.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Directory being listed.
    root: PathBuf,
}

impl Catalog {
    /// Create a catalog over `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this catalog lists.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List every non-directory entry of the root.
    ///
    /// When `filter` is non-empty only entries whose name contains it,
    /// compared case-insensitively, are kept. The listing is not recursive.
    /// Entries are returned sorted by name.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn list(&self, filter: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
        let mut dir = fs::read_dir(&self.root)
            .await
            .map_err(|e| CatalogError::read_dir(&self.root, e))?;

        let needle = filter.to_lowercase();
        let mut entries = Vec::new();

        loop {
            let entry = match dir.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!("Error reading entry in {}: {}", self.root.display(), e);
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().into_owned();

            if !needle.is_empty() && !name.to_lowercase().contains(&needle) {
                continue;
            }

            if let Some(listed) = listed_entry(name, entry.metadata().await) {
                entries.push(listed);
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));

        info!("Listed {} entries (filter: {:?})", entries.len(), filter);

        Ok(entries)
    }
}

/// Turn one directory entry into a listing row.
///
/// Directories are not listed. A failed stat drops the entry with a warning
/// instead of failing the whole listing.
fn listed_entry(name: String, metadata: io::Result<Metadata>) -> Option<CatalogEntry> {
    let metadata = match metadata {
        Ok(m) => m,
        Err(e) => {
            warn!("Failed to get metadata for {}: {}", name, e);
            return None;
        }
    };

    if metadata.is_dir() {
        return None;
    }

    Some(CatalogEntry::from_metadata(name, &metadata))
}
