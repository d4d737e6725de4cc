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

//! mastodon-mcp - MCP server for Mastodon
//!
//! Speaks JSON-RPC on stdin/stdout; logs go to stderr and the log directory.

use anyhow::{Context, Result};
use tracing::{error, info};

use mastodon_mcp::api::MastodonClient;
use mastodon_mcp::config::Config;
use mastodon_mcp::logger::Logger;
use mastodon_mcp::mcp::{self, McpHandler};
use mastodon_mcp::tools::MastodonTools;

#[tokio::main]
async fn main() -> Result<()> {
    Logger::init()?;

    info!("mastodon-mcp starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().await.context("Failed to load configuration")?;
    info!("Using instance {}", config.instance_url);

    let client = MastodonClient::new(&config.instance_url, &config.access_token)
        .context("Failed to create Mastodon client")?;
    let handler = McpHandler::new(MastodonTools::new(client));

    match mcp::run_stdio(handler).await {
        Ok(()) => info!("mastodon-mcp shutting down gracefully"),
        Err(e) => {
            error!("Fatal error in MCP server: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
