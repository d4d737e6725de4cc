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

//! Account model representing a Mastodon user as the server reports it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A Mastodon account snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: String,

    /// Username (without domain)
    pub username: String,

    /// Full account name (user@domain or user for local)
    pub acct: String,

    /// Display name
    #[serde(default)]
    pub display_name: String,

    /// Profile bio (HTML)
    #[serde(default)]
    pub note: String,

    /// URL to the user's profile page
    #[serde(default)]
    pub url: String,

    /// URL to the user's avatar image
    #[serde(default)]
    pub avatar: String,

    /// URL to the user's header image
    #[serde(default)]
    pub header: String,

    /// Whether the account is locked (requires follow approval)
    #[serde(default)]
    pub locked: bool,

    /// Whether this is a bot account
    #[serde(default)]
    pub bot: bool,

    /// Whether this is a group account
    #[serde(default)]
    pub group: bool,

    /// Whether profile is discoverable
    #[serde(default)]
    pub discoverable: Option<bool>,

    /// When the account was created
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Date (not time) the account last posted
    #[serde(default)]
    pub last_status_at: Option<String>,

    /// Number of posts
    #[serde(default)]
    pub statuses_count: u64,

    /// Number of followers
    #[serde(default)]
    pub followers_count: u64,

    /// Number of accounts following
    #[serde(default)]
    pub following_count: u64,

    /// Custom fields on the profile
    #[serde(default)]
    pub fields: Vec<ProfileField>,

    #[serde(default)]
    pub emojis: Vec<Value>,

    #[serde(default)]
    pub roles: Vec<Value>,
}

/// A custom field on a user's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub verified_at: Option<DateTime<Utc>>,
}
