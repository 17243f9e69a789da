//! Notifier client implementation.
//!
//! Sends are one-shot: connect with a bounded timeout, write one frame,
//! close. Failed sends are never retried.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{Instrument, debug, error, info, info_span};

use super::error::NotifyError;
use super::protocol::{build_download_url, encode_frame};
use super::request::NotifyRequest;
use crate::core::config::NotifyConfig;

/// TCP client that pushes download URLs to devices.
#[derive(Debug, Clone)]
pub struct NotifierClient {
    /// Port the device listens on.
    port: u16,

    /// Upper bound on connection establishment, including name resolution.
    connect_timeout: Duration,
}

impl NotifierClient {
    /// Create a client from the notification configuration.
    pub fn new(config: &NotifyConfig) -> Self {
        Self {
            port: config.port,
            connect_timeout: config.connect_timeout,
        }
    }

    /// Send `url` to the device at `target` and close the connection.
    ///
    /// `target` is a host name or IP; a full socket address overrides the
    /// configured port.
    pub async fn send(&self, target: &str, url: &str) -> Result<(), NotifyError> {
        let frame = encode_frame(url)?;
        let explicit = target.parse::<SocketAddr>().ok();
        let peer = match explicit {
            Some(addr) => addr.to_string(),
            None => format!("{}:{}", target, self.port),
        };

        let dial = async {
            match explicit {
                Some(addr) => TcpStream::connect(addr).await,
                None => TcpStream::connect((target, self.port)).await,
            }
        };

        let connect = tokio::time::timeout(self.connect_timeout, dial).await;

        let mut stream = match connect {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                return Err(NotifyError::Connect {
                    target: peer,
                    source: e,
                });
            }
            Err(_) => {
                return Err(NotifyError::ConnectTimeout {
                    target: peer,
                    timeout: self.connect_timeout,
                });
            }
        };

        stream
            .write_all(&frame)
            .await
            .map_err(|e| NotifyError::Write {
                target: peer.clone(),
                source: e,
            })?;

        if let Err(e) = stream.shutdown().await {
            debug!("Failed to shut down connection to {}: {}", peer, e);
        }

        Ok(())
    }

    /// Notify a device in the background.
    ///
    /// Returns as soon as the send is scheduled. The task owns copies of
    /// everything it needs and reports its outcome only through logs.
    pub fn dispatch(&self, request: NotifyRequest, base_url: String) {
        let client = self.clone();
        let span = info_span!("notify", address = %request.address, name = %request.name);

        tokio::spawn(
            async move {
                let url = match build_download_url(&base_url, &request.name) {
                    Ok(url) => url,
                    Err(e) => {
                        error!("{}", e);
                        return;
                    }
                };

                debug!("send {} to address {}", url, request.address);

                match client.send(&request.address, &url).await {
                    Ok(()) => info!("Notified {} to download {}", request.address, request.name),
                    Err(e) => error!("{}", e),
                }
            }
            .instrument(span),
        );
    }
}
