//! HTTP transport configuration.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{TransportError, TransportResult};

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Enable permissive CORS for a browser front end on another origin.
    #[serde(default)]
    pub enable_cors: bool,

    /// Address announced to devices in download URLs. Falls back to the
    /// `Host` header of the triggering request when unset.
    #[serde(default)]
    pub public_base_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: default_host(),
            enable_cors: false,
            public_base_url: None,
        }
    }
}

impl HttpConfig {
    /// Load HTTP config from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(listen) = std::env::var("FBI_LISTEN") {
            if let Err(e) = config.set_listen(&listen) {
                warn!("Ignoring FBI_LISTEN: {}", e);
            }
        }

        if let Ok(base_url) = std::env::var("FBI_BASE_URL") {
            config.set_public_base_url(base_url);
        }

        config.enable_cors = std::env::var("FBI_HTTP_CORS")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        config
    }

    /// Apply a `host:port` listen address.
    ///
    /// An empty host, as in `:8080`, binds every interface.
    pub fn set_listen(&mut self, listen: &str) -> TransportResult<()> {
        let (host, port) = parse_listen(listen)?;
        self.host = host;
        self.port = port;
        Ok(())
    }

    /// Set the announced base URL. An empty value clears it.
    pub fn set_public_base_url(&mut self, base_url: impl Into<String>) {
        let base_url = base_url.into();
        self.public_base_url = if base_url.is_empty() {
            None
        } else {
            Some(base_url)
        };
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        format!("HTTP on {}", self.address())
    }
}

/// Split a listen address into host and port.
pub fn parse_listen(listen: &str) -> TransportResult<(String, u16)> {
    let (host, port) = listen
        .rsplit_once(':')
        .ok_or_else(|| TransportError::invalid_listen(listen, "missing ':port'"))?;

    let port = port
        .parse::<u16>()
        .map_err(|e| TransportError::invalid_listen(listen, e.to_string()))?;

    let host = if host.is_empty() {
        default_host()
    } else {
        host.to_string()
    };

    Ok((host, port))
}
