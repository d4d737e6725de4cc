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

//! Error types for the API client, the tool layer and configuration

use thiserror::Error;

/// Errors raised by [`crate::api::MastodonClient`]
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connection, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A 2xx response whose body did not decode into the expected type
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a non-2xx status
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ApiError {
    /// HTTP status of a server-side failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Json(_) => None,
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised while running a tool
#[derive(Error, Debug)]
pub enum ToolError {
    /// Arguments failed the tool's input schema; nothing was sent
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Reading or uploading the media file failed; no status was created
    #[error("Failed to upload media: {0}")]
    MediaUpload(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ToolError {
    /// Whether the caller sent a bad request rather than the call failing remotely
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidArguments(_) | Self::UnknownTool(_))
    }
}

/// Result type for tool operations
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors raised while resolving credentials
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No access token: set MASTODON_ACCESS_TOKEN or MASTODON_TOKEN_COMMAND")]
    MissingToken,

    #[error("Token command failed: {0}")]
    TokenCommand(String),
}
