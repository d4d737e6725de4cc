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

//! Hashtag models shared by the trends and search endpoints

use serde::{Deserialize, Serialize};

/// A hashtag with its recent usage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingTag {
    pub name: String,
    pub url: String,

    /// Daily usage, most recent day first
    #[serde(default)]
    pub history: Vec<TagHistory>,

    /// Whether the current user follows this tag
    #[serde(default)]
    pub following: Option<bool>,
}

impl TrendingTag {
    /// Usage entry for the most recent day, if the server sent any
    pub fn today(&self) -> Option<&TagHistory> {
        self.history.first()
    }
}

/// One day of hashtag usage. The server encodes all three fields as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagHistory {
    /// UNIX timestamp of midnight for the day
    pub day: String,
    pub uses: String,
    pub accounts: String,
}
