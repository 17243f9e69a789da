//! File store implementation.
//!
//! Concurrent writes or deletes of the same name are not coordinated; the
//! last writer wins. A failed upload leaves the partially written file in
//! place so that a retry simply overwrites it.

use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tokio_util::io::StreamReader;
use tracing::{debug, error, info, instrument, warn};

use super::error::StorageError;
use super::extensions::is_accepted_package;
use crate::core::security::PathGuard;

/// A file opened for download along with its metadata.
#[derive(Debug)]
pub struct OpenedFile {
    /// Open handle positioned at the start of the file.
    pub file: File,

    /// Resolved path inside the data directory.
    pub path: PathBuf,

    /// File length in bytes at open time.
    pub len: u64,
}

/// Byte storage confined to the data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    guard: PathGuard,
}

impl FileStore {
    /// Create a store rooted at the guard's directory.
    pub fn new(guard: PathGuard) -> Self {
        Self { guard }
    }

    /// The guard every name goes through.
    pub fn guard(&self) -> &PathGuard {
        &self.guard
    }

    /// Resolve `name` inside the data directory.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        Ok(self.guard.resolve(name)?)
    }

    /// Store an installer package under `name`, streaming `body` into it.
    ///
    /// The extension and path are validated before the file is created. An
    /// existing file is truncated and replaced. Returns the number of bytes
    /// written.
    #[instrument(skip(self, body))]
    pub async fn upload<S, E>(&self, name: &str, body: S) -> Result<u64, StorageError>
    where
        S: Stream<Item = Result<Bytes, E>> + Unpin,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        if !is_accepted_package(name) {
            warn!("Rejected upload with unsupported extension: {}", name);
            return Err(StorageError::unsupported_extension(name));
        }

        let path = self.resolve(name)?;
        self.write_stream(&path, body).await
    }

    /// Stream `body` into `path`, creating or truncating it.
    async fn write_stream<S, E>(&self, path: &Path, body: S) -> Result<u64, StorageError>
    where
        S: Stream<Item = Result<Bytes, E>> + Unpin,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let mut file = File::create(path).await.map_err(|e| {
            error!("Failed to open file {}: {}", path.display(), e);
            StorageError::io(path, e)
        })?;

        let mut reader = StreamReader::new(body.map_err(io::Error::other));

        let written = match tokio::io::copy(&mut reader, &mut file).await {
            Ok(n) => n,
            Err(e) => {
                error!("Failed to write file {}: {}", path.display(), e);
                return Err(StorageError::io(path, e));
            }
        };

        file.flush().await.map_err(|e| {
            error!("Failed to flush file {}: {}", path.display(), e);
            StorageError::io(path, e)
        })?;

        info!("Stored {} bytes at {}", written, path.display());

        Ok(written)
    }

    /// Open the file stored under `name` for reading.
    #[instrument(skip(self))]
    pub async fn open(&self, name: &str) -> Result<OpenedFile, StorageError> {
        let path = self.resolve(name)?;

        if !is_file(&path).await {
            debug!("No file at {}", path.display());
            return Err(StorageError::NotFound(path));
        }

        let file = File::open(&path)
            .await
            .map_err(|e| StorageError::io(&path, e))?;
        let len = file
            .metadata()
            .await
            .map_err(|e| StorageError::io(&path, e))?
            .len();

        Ok(OpenedFile { file, path, len })
    }

    /// Remove the file stored under `name`.
    ///
    /// Fails with [`StorageError::NotFound`] when `name` does not refer to an
    /// existing regular file; nothing is touched in that case.
    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<PathBuf, StorageError> {
        let path = self.resolve(name)?;

        if !is_file(&path).await {
            return Err(StorageError::NotFound(path));
        }

        fs::remove_file(&path).await.map_err(|e| {
            error!("Failed to remove file {}: {}", path.display(), e);
            StorageError::io(&path, e)
        })?;

        info!("Deleted {}", path.display());

        Ok(path)
    }
}

/// Whether `path` is an existing regular file. Directories, sockets, FIFOs
/// and device nodes count as absent, as do stat failures.
async fn is_file(path: &Path) -> bool {
    match fs::metadata(path).await {
        Ok(metadata) => metadata.is_file(),
        Err(_) => false,
    }
}
