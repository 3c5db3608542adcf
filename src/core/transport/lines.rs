//! Line-delimited request handling shared by the STDIO and TCP transports.
//!
//! Each input line is a JSON [`QueryRequest`]. Each non-blank line produces
//! exactly one JSON response line. A line that is not a valid request gets an
//! error response instead of ending the stream.

use async_graphql::{Response, ServerError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::warn;

use super::TransportResult;
use crate::core::{CatalogServer, QueryRequest};

/// Answer one request line.
pub(crate) async fn respond(server: &CatalogServer, line: &str) -> TransportResult<String> {
    let response = match serde_json::from_str::<QueryRequest>(line) {
        Ok(request) => server.execute(request).await,
        Err(e) => {
            warn!("Rejected request line: {}", e);
            Response::from_errors(vec![ServerError::new(
                format!("Invalid request: {}", e),
                None,
            )])
        }
    };

    Ok(serde_json::to_string(&response)?)
}

/// Serve requests from `reader` until EOF, writing responses to `writer`.
pub(crate) async fn serve<R, W>(
    server: &CatalogServer,
    reader: R,
    mut writer: W,
) -> TransportResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let mut out = respond(server, &line).await?;
        out.push('\n');
        writer.write_all(out.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}
