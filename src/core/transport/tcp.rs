//! TCP transport implementation.
//!
//! Line-delimited JSON requests over raw TCP sockets, one task per
//! connection.

use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use super::{TransportError, TransportResult, config::TcpConfig, lines};
use crate::core::CatalogServer;

/// TCP transport handler.
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    /// Create a new TCP transport with the given config.
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the TCP transport.
    pub async fn run(self, server: CatalogServer) -> TransportResult<()> {
        let addr = self.address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (line-delimited JSON over TCP)", addr);

        Self::accept_loop(listener, server).await
    }

    async fn accept_loop(listener: TcpListener, server: CatalogServer) -> TransportResult<()> {
        loop {
            match listener.accept().await {
                Ok((stream, peer_addr)) => {
                    info!("Accepted connection from {}", peer_addr);

                    // Set TCP_NODELAY to disable Nagle's algorithm
                    if let Err(e) = stream.set_nodelay(true) {
                        warn!("Failed to set TCP_NODELAY for {}: {}", peer_addr, e);
                    }

                    let server = server.clone();
                    tokio::spawn(async move {
                        Self::handle_connection(server, stream, peer_addr).await;
                    });
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    // Small delay to avoid spinning on persistent errors
                    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                }
            }
        }
    }

    /// Handle a single TCP connection.
    async fn handle_connection(
        server: CatalogServer,
        stream: TcpStream,
        peer_addr: std::net::SocketAddr,
    ) {
        let (read_half, write_half) = stream.into_split();

        match lines::serve(&server, BufReader::new(read_half), write_half).await {
            Ok(()) => info!("Client {} disconnected cleanly", peer_addr),
            Err(e) => warn!("Error while serving client {}: {}", peer_addr, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::catalog::Catalog;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_serves_requests_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = CatalogServer::with_catalog(Config::default(), Catalog::fixture());
        tokio::spawn(TcpTransport::accept_loop(listener, server));

        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, mut write_half) = stream.into_split();
        write_half
            .write_all(b"{\"query\": \"{ songs(album: \\\"lz\\\") { id } }\"}\n")
            .await
            .unwrap();

        let mut reply = String::new();
        BufReader::new(read_half).read_line(&mut reply).await.unwrap();

        let body: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(body["data"]["songs"].as_array().unwrap().len(), 2);
    }
}
