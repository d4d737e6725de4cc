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

//! Post model representing a Mastodon status/toot

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Account, MediaAttachment};

/// Visibility level for a post
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Unlisted,
    Private,
    Direct,
}

/// Application that posted the status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
}

/// A published Mastodon post/status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    /// Unique identifier for this post
    pub id: String,

    /// URI of the post (ActivityPub)
    #[serde(default)]
    pub uri: String,

    /// URL to the post's HTML representation
    #[serde(default)]
    pub url: Option<String>,

    /// The account that authored this post
    pub account: Account,

    /// HTML content of the post
    #[serde(default)]
    pub content: String,

    /// Content warning text (if any)
    #[serde(default)]
    pub spoiler_text: String,

    /// Visibility of this post
    #[serde(default)]
    pub visibility: Visibility,

    /// Whether this is a sensitive post
    #[serde(default)]
    pub sensitive: bool,

    /// When this post was created
    pub created_at: DateTime<Utc>,

    /// When this post was last edited (if ever)
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,

    /// Language of the post (ISO 639-1)
    #[serde(default)]
    pub language: Option<String>,

    /// ID of the post this is replying to
    #[serde(default)]
    pub in_reply_to_id: Option<String>,

    /// ID of the account this is replying to
    #[serde(default)]
    pub in_reply_to_account_id: Option<String>,

    /// Media attachments
    #[serde(default)]
    pub media_attachments: Vec<MediaAttachment>,

    /// Number of boosts
    #[serde(default)]
    pub reblogs_count: u64,

    /// Number of favorites
    #[serde(default)]
    pub favourites_count: u64,

    /// Number of replies
    #[serde(default)]
    pub replies_count: u64,

    /// The boosted post (if this is a boost)
    #[serde(default)]
    pub reblog: Option<Box<Status>>,

    /// Application used to post this
    #[serde(default)]
    pub application: Option<Application>,

    #[serde(default)]
    pub reblogged: Option<bool>,
    #[serde(default)]
    pub favourited: Option<bool>,
    #[serde(default)]
    pub bookmarked: Option<bool>,
    #[serde(default)]
    pub muted: Option<bool>,
    #[serde(default)]
    pub pinned: Option<bool>,

    // Passed through untouched; nothing here reads them.
    #[serde(default)]
    pub mentions: Vec<Value>,
    #[serde(default)]
    pub tags: Vec<Value>,
    #[serde(default)]
    pub emojis: Vec<Value>,
    #[serde(default)]
    pub filtered: Vec<Value>,
    #[serde(default)]
    pub card: Option<Value>,
    #[serde(default)]
    pub poll: Option<Value>,
}

/// Creation parameters echoed back for a status that has not been published yet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledStatusParams {
    pub text: String,
    #[serde(default)]
    pub poll: Option<Value>,
    #[serde(default)]
    pub media_ids: Option<Vec<String>>,
    #[serde(default)]
    pub sensitive: Option<bool>,
    #[serde(default)]
    pub spoiler_text: Option<String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub in_reply_to_id: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<String>,
}

/// A status queued for publication at a future time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledStatus {
    pub id: String,

    /// When the server will publish the status
    pub scheduled_at: DateTime<Utc>,

    pub params: ScheduledStatusParams,

    /// May be empty even if media was requested; attachment happens when the status fires
    #[serde(default)]
    pub media_attachments: Vec<MediaAttachment>,
}

/// Response of the status-creation endpoint.
///
/// The server sends no type tag. An object with a `url` key (even a null one) is a
/// published [`Status`]; one without `url` but with `scheduled_at` is a [`ScheduledStatus`].
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StatusOrScheduled {
    Published(Box<Status>),
    Scheduled(ScheduledStatus),
}

impl<'de> Deserialize<'de> for StatusOrScheduled {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let object = value
            .as_object()
            .ok_or_else(|| de::Error::custom("status response is not a JSON object"))?;

        if object.contains_key("url") {
            serde_json::from_value(value)
                .map(|status| StatusOrScheduled::Published(Box::new(status)))
                .map_err(de::Error::custom)
        } else if object.contains_key("scheduled_at") {
            serde_json::from_value(value)
                .map(StatusOrScheduled::Scheduled)
                .map_err(de::Error::custom)
        } else {
            Err(de::Error::custom(
                "status response has neither `url` nor `scheduled_at`",
            ))
        }
    }
}

/// Request body for `POST /api/v1/statuses`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateStatusParams {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spoiler_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll: Option<NewPoll>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to_id: Option<String>,
    /// ISO 8601 timestamp; the server creates a scheduled status when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
}

/// Request to create a poll
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPoll {
    pub options: Vec<String>,
    /// Documented upstream as seconds; forwarded as given
    pub expires_in: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_totals: Option<bool>,
}
