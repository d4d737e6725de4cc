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

//! `mastodon_get_trending_tags`: hashtags currently trending on the instance

use serde::Deserialize;
use serde_json::json;

use super::format::numbered;
use super::{check_range, ToolArgs, ToolDefinition};
use crate::api::MastodonClient;
use crate::error::ToolResult;
use crate::models::TrendingTag;

pub const NAME: &str = "mastodon_get_trending_tags";

const DESCRIPTION: &str = "Get the hashtags currently trending on the Mastodon instance";

const MIN_LIMIT: u32 = 1;
const MAX_LIMIT: u32 = 20;

fn default_limit() -> u32 {
    10
}

#[derive(Debug, Deserialize)]
pub struct TrendsArgs {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl ToolArgs for TrendsArgs {
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
                "limit": {
                    "type": "integer",
                    "minimum": MIN_LIMIT,
                    "maximum": MAX_LIMIT,
                    "default": default_limit(),
                    "description": "Number of hashtags to fetch"
                }
            }
        }),
    }
}

pub async fn run(client: &MastodonClient, args: TrendsArgs) -> ToolResult<String> {
    let tags = client.trending_tags(Some(args.limit)).await?;
    Ok(render(&tags))
}

pub fn render(tags: &[TrendingTag]) -> String {
    if tags.is_empty() {
        return "No trending hashtags found.".to_string();
    }

    let list = numbered(tags, |i, tag| {
        let usage = match tag.today() {
            Some(day) => format!("{} uses by {} people", day.uses, day.accounts),
            None => "No recent data".to_string(),
        };
        format!("{}. #{}\n   {}\n   URL: {}", i, tag.name, usage, tag.url)
    });

    format!("Found {} trending hashtags\n\n{}", tags.len(), list)
}
