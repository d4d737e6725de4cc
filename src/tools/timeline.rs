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

//! `mastodon_get_timeline`: read the home, federated or local timeline

use serde::Deserialize;
use serde_json::json;

use super::format::{numbered, render_status};
use super::{check_range, ToolArgs, ToolDefinition};
use crate::api::MastodonClient;
use crate::error::ToolResult;
use crate::models::{Status, TimelineParams, TimelineType};

pub const NAME: &str = "mastodon_get_timeline";

const DESCRIPTION: &str = "Fetch posts from a Mastodon timeline (home, public, or local)";

const MIN_LIMIT: u32 = 1;
const MAX_LIMIT: u32 = 40;

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize)]
pub struct TimelineArgs {
    #[serde(default)]
    pub timeline_type: TimelineType,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub max_id: Option<String>,
    #[serde(default)]
    pub since_id: Option<String>,
}

impl ToolArgs for TimelineArgs {
    fn validate(&self) -> Result<(), String> {
        check_range("limit", self.limit, MIN_LIMIT, MAX_LIMIT)
    }
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: NAME,
        description: DESCRIPTION,
        input_schema: json!({
            "type": "object",
            "properties": {
                "timeline_type": {
                    "type": "string",
                    "enum": ["home", "public", "local"],
                    "default": "home",
                    "description": "Which timeline to read"
                },
                "limit": {
                    "type": "integer",
                    "minimum": MIN_LIMIT,
                    "maximum": MAX_LIMIT,
                    "default": default_limit(),
                    "description": "Number of posts to fetch"
                },
                "max_id": {
                    "type": "string",
                    "description": "Return results older than this ID"
                },
                "since_id": {
                    "type": "string",
                    "description": "Return results newer than this ID"
                }
            }
        }),
    }
}

pub async fn run(client: &MastodonClient, args: TimelineArgs) -> ToolResult<String> {
    let params = TimelineParams {
        limit: Some(args.limit),
        max_id: args.max_id,
        since_id: args.since_id,
        ..Default::default()
    };

    let statuses = match args.timeline_type {
        TimelineType::Home => client.home_timeline(&params).await?,
        TimelineType::Public => client.public_timeline(&params).await?,
        TimelineType::Local => client.local_timeline(&params).await?,
    };

    Ok(render(args.timeline_type, &statuses))
}

pub fn render(timeline_type: TimelineType, statuses: &[Status]) -> String {
    format!(
        "Found {} posts from {} timeline\n\n{}",
        statuses.len(),
        timeline_type,
        numbered(statuses, render_status)
    )
}
