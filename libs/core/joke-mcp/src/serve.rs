//! Line-delimited stdio transport
//!
//! One JSON-RPC message per line in, one response per line out. Stdout is the
//! protocol channel, so nothing else may write to it.

use crate::error::Result;
use crate::mcp::McpHandler;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

/// Serve requests read from `reader` until it reaches end of input.
pub async fn serve<R, W>(handler: &McpHandler, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        debug!(bytes = line.len(), "Request received");
        if let Some(response) = handler.handle_json(line).await {
            writer.write_all(response.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    info!("Input closed, stopping MCP server");
    Ok(())
}

/// Serve over the process's stdin/stdout.
pub async fn serve_stdio(handler: &McpHandler) -> Result<()> {
    info!(tools = ?handler.tool_names(), "MCP server listening on stdio");
    serve(handler, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}
