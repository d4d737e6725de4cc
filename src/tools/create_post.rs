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

//! `mastodon_create_toot`: publish or schedule a post, optionally with one media file

use chrono::DateTime;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use tracing::info;

use super::{ToolArgs, ToolDefinition};
use crate::api::MastodonClient;
use crate::error::{ToolError, ToolResult};
use crate::models::{CreateStatusParams, StatusOrScheduled, Visibility};

use super::format::{format_timestamp, status_link};

pub const NAME: &str = "mastodon_create_toot";

const DESCRIPTION: &str =
    "Create a new toot (status) on Mastodon, optionally with media attachments";

/// File name used when the media path has no final component
const FALLBACK_FILENAME: &str = "image";

#[derive(Debug, Deserialize)]
pub struct CreatePostArgs {
    pub content: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default)]
    pub spoiler_text: String,
    #[serde(default)]
    pub media_file: Option<String>,
    #[serde(default)]
    pub media_description: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub in_reply_to_id: Option<String>,
}

impl ToolArgs for CreatePostArgs {
    fn validate(&self) -> Result<(), String> {
        if let Some(scheduled_at) = &self.scheduled_at {
            let invalid = || {
                format!(
                    "`scheduled_at` is not a valid datetime: {:?}; expected ISO 8601 with an offset \
                     (e.g. 2024-01-01T10:00:00Z or 2024-01-01T10:00:00+01:00)",
                    scheduled_at
                )
            };

            // RFC 3339 also admits a space between date and time; ISO 8601 does not
            if !matches!(scheduled_at.as_bytes().get(10), Some(b'T' | b't')) {
                return Err(invalid());
            }
            DateTime::parse_from_rfc3339(scheduled_at).map_err(|_| invalid())?;
        }
        Ok(())
    }
}

pub fn input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "content": {
                "type": "string",
                "description": "The text content of the toot"
            },
            "visibility": {
                "type": "string",
                "enum": ["public", "unlisted", "private", "direct"],
                "default": "public",
                "description": "The visibility level of the toot"
            },
            "sensitive": {
                "type": "boolean",
                "default": false,
                "description": "Mark the toot as sensitive content"
            },
            "spoiler_text": {
                "type": "string",
                "default": "",
                "description": "Text to be shown as a warning before the actual content"
            },
            "media_file": {
                "type": "string",
                "description": "Path to a media file to attach (image, video, or audio)"
            },
            "media_description": {
                "type": "string",
                "description": "Alt text / description for the attached media"
            },
            "scheduled_at": {
                "type": "string",
                "format": "date-time",
                "description": "Optional ISO 8601 datetime to schedule the toot for a future time. \
                                Examples: 2024-01-01T10:00:00Z, 2024-01-01T10:00:00+01:00"
            },
            "language": {
                "type": "string",
                "description": "ISO 639 language code of the toot"
            },
            "in_reply_to_id": {
                "type": "string",
                "description": "ID of the status this toot replies to"
            }
        },
        "required": ["content"]
    })
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: NAME,
        description: DESCRIPTION,
        input_schema: input_schema(),
    }
}

pub async fn run(client: &MastodonClient, args: CreatePostArgs) -> ToolResult<String> {
    let media_ids = match &args.media_file {
        Some(path) => {
            let id = upload(client, path, args.media_description.as_deref()).await?;
            Some(vec![id])
        }
        None => None,
    };

    let params = CreateStatusParams {
        status: args.content,
        visibility: Some(args.visibility),
        sensitive: Some(args.sensitive),
        spoiler_text: Some(args.spoiler_text),
        language: args.language,
        media_ids,
        poll: None,
        in_reply_to_id: args.in_reply_to_id,
        scheduled_at: args.scheduled_at,
    };

    let result = client.create_status(&params).await?;
    Ok(render(&result))
}

/// Read and upload the media file, returning the attachment id
async fn upload(
    client: &MastodonClient,
    path: &str,
    description: Option<&str>,
) -> ToolResult<String> {
    let file = tokio::fs::read(path)
        .await
        .map_err(|e| ToolError::MediaUpload(format!("{}: {}", path, e)))?;

    let filename = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(FALLBACK_FILENAME);

    let media = client
        .upload_media(file, filename, description)
        .await
        .map_err(|e| ToolError::MediaUpload(e.to_string()))?;

    info!("Attached media {} from {}", media.id, path);
    Ok(media.id)
}

pub fn render(result: &StatusOrScheduled) -> String {
    match result {
        StatusOrScheduled::Published(status) => {
            let urls: Vec<&str> = status
                .media_attachments
                .iter()
                .filter_map(|m| m.url.as_deref())
                .collect();
            let media_info = if urls.is_empty() {
                String::new()
            } else {
                format!("\nMedia: {}", urls.join(", "))
            };

            format!(
                "Successfully created toot! View it at: {}{}",
                status_link(status),
                media_info
            )
        }
        StatusOrScheduled::Scheduled(scheduled) => {
            let media_info = match scheduled.media_attachments.len() {
                0 => String::new(),
                n => format!("\nMedia will be attached: {} item(s).", n),
            };

            format!(
                "Successfully scheduled toot! ID: {}. It will be posted at: {}.{}",
                scheduled.id,
                format_timestamp(&scheduled.scheduled_at),
                media_info
            )
        }
    }
}
