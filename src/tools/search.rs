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

//! `mastodon_search`: find accounts, hashtags and posts

use serde::Deserialize;
use serde_json::json;

use super::format::{excerpt, numbered, render_status};
use super::{check_range, ToolArgs, ToolDefinition};
use crate::api::MastodonClient;
use crate::error::ToolResult;
use crate::models::{Account, SearchParams, SearchResults, SearchType, TrendingTag};

pub const NAME: &str = "mastodon_search";

const DESCRIPTION: &str = "Search for accounts, hashtags, or posts on Mastodon";

const MIN_LIMIT: u32 = 1;
const MAX_LIMIT: u32 = 40;

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize)]
pub struct SearchArgs {
    pub query: String,
    #[serde(default, rename = "type")]
    pub search_type: Option<SearchType>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub resolve: bool,
    #[serde(default)]
    pub following: bool,
}

impl ToolArgs for SearchArgs {
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
                "query": {
                    "type": "string",
                    "description": "The search query"
                },
                "type": {
                    "type": "string",
                    "enum": ["accounts", "hashtags", "statuses"],
                    "description": "Restrict results to one type"
                },
                "limit": {
                    "type": "integer",
                    "minimum": MIN_LIMIT,
                    "maximum": MAX_LIMIT,
                    "default": default_limit(),
                    "description": "Maximum number of results per type"
                },
                "resolve": {
                    "type": "boolean",
                    "default": false,
                    "description": "Attempt WebFinger lookup for remote accounts"
                },
                "following": {
                    "type": "boolean",
                    "default": false,
                    "description": "Only include accounts the user is following"
                }
            },
            "required": ["query"]
        }),
    }
}

pub async fn run(client: &MastodonClient, args: SearchArgs) -> ToolResult<String> {
    let params = SearchParams {
        search_type: args.search_type,
        limit: Some(args.limit),
        resolve: Some(args.resolve),
        following: Some(args.following),
        ..SearchParams::new(args.query.as_str())
    };

    let results = client.search(&params).await?;
    Ok(render(&args.query, &results))
}

pub fn render(query: &str, results: &SearchResults) -> String {
    if results.is_empty() {
        return format!("No results found for query: \"{}\"", query);
    }

    let mut sections = Vec::new();

    if !results.accounts.is_empty() {
        sections.push(format!(
            "**Accounts ({})**\n{}",
            results.accounts.len(),
            numbered(&results.accounts, render_account)
        ));
    }

    if !results.hashtags.is_empty() {
        sections.push(format!(
            "**Hashtags ({})**\n{}",
            results.hashtags.len(),
            numbered(&results.hashtags, render_hashtag)
        ));
    }

    if !results.statuses.is_empty() {
        sections.push(format!(
            "**Posts ({})**\n{}",
            results.statuses.len(),
            numbered(&results.statuses, render_status)
        ));
    }

    format!("Search results for \"{}\"\n\n{}", query, sections.join("\n\n"))
}

fn render_account(index: usize, account: &Account) -> String {
    format!(
        "{}. @{} ({})\n   Followers: {} | Following: {} | Posts: {}\n   {}...\n   URL: {}",
        index,
        account.acct,
        account.display_name,
        account.followers_count,
        account.following_count,
        account.statuses_count,
        excerpt(&account.note),
        account.url
    )
}

fn render_hashtag(index: usize, tag: &TrendingTag) -> String {
    let uses = match tag.today() {
        Some(day) => format!("{} uses", day.uses),
        None => "No recent data".to_string(),
    };
    format!("{}. #{} ({})\n   URL: {}", index, tag.name, uses, tag.url)
}
