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

//! Data models for mastodon-mcp
//!
//! These models mirror the subset of the Mastodon REST API the tools touch,
//! plus the JSON-RPC envelope used on the MCP channel.

mod account;
mod media;
mod post;
mod rpc_message;
mod search;
mod timeline;
mod trends;

pub use account::*;
pub use media::*;
pub use post::*;
pub use rpc_message::*;
pub use search::*;
pub use timeline::*;
pub use trends::*;
