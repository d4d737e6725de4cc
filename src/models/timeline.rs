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

//! Timeline selection and pagination parameters

use serde::{Deserialize, Serialize};

/// Timelines reachable through the timeline tool
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimelineType {
    /// Home timeline (posts from followed accounts)
    #[default]
    Home,
    /// Federated timeline (posts from all known instances)
    Public,
    /// Local timeline (posts from the instance)
    Local,
}

impl TimelineType {
    /// Wire name, also used in tool output
    pub fn as_str(&self) -> &'static str {
        match self {
            TimelineType::Home => "home",
            TimelineType::Public => "public",
            TimelineType::Local => "local",
        }
    }
}

impl std::fmt::Display for TimelineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters for `GET /api/v1/timelines/*`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineParams {
    pub limit: Option<u32>,
    pub max_id: Option<String>,
    pub since_id: Option<String>,
    pub min_id: Option<String>,
    pub local: Option<bool>,
    pub remote: Option<bool>,
}

impl TimelineParams {
    /// Query pairs in field order; absent values are dropped later
    pub fn query_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("limit", self.limit.map(|v| v.to_string())),
            ("max_id", self.max_id.clone()),
            ("since_id", self.since_id.clone()),
            ("min_id", self.min_id.clone()),
            ("local", self.local.map(|v| v.to_string())),
            ("remote", self.remote.map(|v| v.to_string())),
        ]
    }
}
