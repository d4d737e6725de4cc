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

//! Mastodon tools for AI agents, served over the Model Context Protocol
//!
//! The [`api`] client performs authenticated round trips against one
//! instance, [`tools`] validates agent arguments and renders results as text,
//! and [`mcp`] exposes the tools as JSON-RPC over stdio.

pub mod api;
pub mod config;
pub mod error;
pub mod logger;
pub mod mcp;
pub mod models;
pub mod tools;
