//! STDIO transport implementation.
//!
//! Reads one JSON request per line from stdin and writes one JSON response
//! per line to stdout. Logs go to stderr.

use tokio::io::BufReader;
use tracing::info;

use super::{TransportResult, lines};
use crate::core::CatalogServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until stdin is closed.
    pub async fn run(server: CatalogServer) -> TransportResult<()> {
        info!("Ready - reading requests from stdin");

        let reader = BufReader::new(tokio::io::stdin());
        lines::serve(&server, reader, tokio::io::stdout()).await?;

        info!("STDIO transport finished");
        Ok(())
    }
}
