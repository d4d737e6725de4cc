// mastodon-mcp - Mastodon tools for AI agents over the Model Context Protocol
// Copyright (C) 2025 mastodon-mcp Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! MCP server over newline-delimited stdio

use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::models::RpcResponse;

use super::handler::{parse_error, McpHandler};

/// Run the server on the process's stdin and stdout until EOF or Ctrl-C
pub async fn run_stdio(handler: McpHandler) -> Result<()> {
    info!("Serving MCP on stdio");

    let reader = tokio::io::BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();

    tokio::select! {
        result = serve(Arc::new(handler), reader, writer) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            Ok(())
        }
    }
}

/// Serve requests read line by line from `reader`, writing responses to `writer`.
///
/// A line that is not UTF-8 is answered with a parse error and the session goes on.
/// Each request runs on its own task; responses may be written out of order.
/// Returns once the input is exhausted and every in-flight request has answered.
pub async fn serve<R, W>(handler: Arc<McpHandler>, mut reader: R, writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let writer = Arc::new(Mutex::new(writer));
    let mut tasks = JoinSet::new();
    let mut frame = Vec::new();

    loop {
        frame.clear();
        match reader.read_until(b'\n', &mut frame).await {
            Ok(0) => {
                info!("Client disconnected");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                error!("Read error: {}", e);
                break;
            }
        }

        let line = match std::str::from_utf8(&frame) {
            Ok(line) => line,
            Err(e) => {
                warn!("Discarding frame that is not UTF-8: {}", e);
                if let Err(e) = write_response(&writer, &parse_error(e)).await {
                    error!("Failed to write response: {}", e);
                }
                continue;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        debug!("Received message: {}", trimmed);

        let handler = handler.clone();
        let writer = writer.clone();
        let message = trimmed.to_string();

        tasks.spawn(async move {
            if let Some(response) = handler.handle_line(&message).await {
                if let Err(e) = write_response(&writer, &response).await {
                    error!("Failed to write response: {}", e);
                }
            }
        });

        // Reap finished tasks so the set does not grow with the session
        while tasks.try_join_next().is_some() {}
    }

    while let Some(result) = tasks.join_next().await {
        if let Err(e) = result {
            error!("Request task failed: {}", e);
        }
    }

    Ok(())
}

async fn write_response<W>(writer: &Mutex<W>, response: &RpcResponse) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let response_json = serde_json::to_string(response)?;

    let mut w = writer.lock().await;
    w.write_all(response_json.as_bytes()).await?;
    w.write_all(b"\n").await?;
    w.flush().await?;

    debug!("Sent response: {}", response_json);
    Ok(())
}
