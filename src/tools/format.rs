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

//! Plain-text rendering shared by the tools

use chrono::{DateTime, Utc};

use crate::models::Status;

/// Characters of post or bio text shown in a listing
pub const EXCERPT_CHARS: usize = 100;

/// Strip HTML tags from content for plain text
pub fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    // `&amp;` last, so "&amp;lt;" stays "&lt;"
    result
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// First [`EXCERPT_CHARS`] characters of the tag-stripped text
pub fn excerpt(html: &str) -> String {
    strip_html(html).chars().take(EXCERPT_CHARS).collect()
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Render items as a 1-based numbered list separated by blank lines
pub fn numbered<T>(items: &[T], render: impl Fn(usize, &T) -> String) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| render(i + 1, item))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One post as it appears in timeline and search listings
pub fn render_status(index: usize, status: &Status) -> String {
    let reblog_info = status
        .reblog
        .as_ref()
        .map(|original| format!(" (reblogged from @{})", original.account.acct))
        .unwrap_or_default();

    let media_info = match status.media_attachments.len() {
        0 => String::new(),
        n => format!(" [{} media]", n),
    };

    format!(
        "{}. @{}{}: {}...{}\n   Posted: {}\n   URL: {}",
        index,
        status.account.acct,
        reblog_info,
        excerpt(&status.content),
        media_info,
        format_timestamp(&status.created_at),
        status_link(status),
    )
}

/// Permalink, falling back to the ActivityPub URI when the server sent no URL
pub fn status_link(status: &Status) -> &str {
    status.url.as_deref().unwrap_or(&status.uri)
}
