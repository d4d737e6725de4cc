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

//! Search request and result models

use serde::{Deserialize, Serialize};

use super::{Account, Status, TrendingTag};

/// Restricts a search to one kind of result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    Accounts,
    Hashtags,
    Statuses,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Accounts => "accounts",
            SearchType::Hashtags => "hashtags",
            SearchType::Statuses => "statuses",
        }
    }
}

/// Query parameters for `GET /api/v2/search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(rename = "type")]
    pub search_type: Option<SearchType>,
    pub limit: Option<u32>,
    pub resolve: Option<bool>,
    pub following: Option<bool>,
    pub account_id: Option<String>,
    pub max_id: Option<String>,
    pub min_id: Option<String>,
    pub offset: Option<u32>,
}

impl SearchParams {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }

    /// Query pairs in field order; absent values are dropped later
    pub fn query_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("q", Some(self.q.clone())),
            ("type", self.search_type.map(|t| t.as_str().to_string())),
            ("limit", self.limit.map(|v| v.to_string())),
            ("resolve", self.resolve.map(|v| v.to_string())),
            ("following", self.following.map(|v| v.to_string())),
            ("account_id", self.account_id.clone()),
            ("max_id", self.max_id.clone()),
            ("min_id", self.min_id.clone()),
            ("offset", self.offset.map(|v| v.to_string())),
        ]
    }
}

/// Results of a search; any section may be empty
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub statuses: Vec<Status>,
    #[serde(default)]
    pub hashtags: Vec<TrendingTag>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.statuses.is_empty() && self.hashtags.is_empty()
    }
}
