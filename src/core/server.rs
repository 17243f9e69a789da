//! Installer server state and lifecycle.
//!
//! `InstallerServer` is the application handle shared by every request. It
//! is built once from [`Config`] and cloned cheaply into handlers; none of
//! its parts are mutated after construction.

use std::path::Path;
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error::Result;
use super::security::PathGuard;
use crate::domains::{
    catalog::Catalog,
    notify::{NotifierClient, effective_base_url},
    storage::FileStore,
};

/// The shared application state.
#[derive(Clone)]
pub struct InstallerServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Live listing of the data directory.
    catalog: Catalog,

    /// Confined file access.
    store: FileStore,

    /// Device notifier.
    notifier: NotifierClient,
}

impl InstallerServer {
    /// Create a server from `config`.
    ///
    /// The data directory is created if absent and canonicalized; its
    /// canonical path becomes the root every file name is confined to.
    pub fn new(config: Config) -> Result<Self> {
        let root = config.storage.prepare_data_dir()?;
        let guard = PathGuard::new(&root)?;

        info!("Serving packages from {}", guard.root().display());

        Ok(Self {
            catalog: Catalog::new(guard.root()),
            store: FileStore::new(guard),
            notifier: NotifierClient::new(&config.notify),
            config: Arc::new(config),
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The canonical data directory.
    pub fn root(&self) -> &Path {
        self.store.guard().root()
    }

    /// Get the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get the file store.
    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Get the notifier.
    pub fn notifier(&self) -> &NotifierClient {
        &self.notifier
    }

    /// Base URL announced to devices for a request that arrived on
    /// `request_host`.
    pub fn announce_base<'a>(&'a self, request_host: Option<&'a str>) -> Option<&'a str> {
        effective_base_url(self.config.http.public_base_url.as_deref(), request_host)
    }
}
