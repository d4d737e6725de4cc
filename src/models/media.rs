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

//! Media attachment model

use serde::{Deserialize, Serialize};

/// Type of media attachment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Image,
    Video,
    Gifv,
    Audio,
    #[serde(other)]
    Unknown,
}

/// A media attachment, as returned by the upload endpoint or embedded in a status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaAttachment {
    /// Unique identifier, used as a `media_ids` entry when posting
    pub id: String,

    /// Type of media
    #[serde(rename = "type")]
    pub media_type: MediaType,

    /// URL to the media file (null while the server is still processing it)
    #[serde(default)]
    pub url: Option<String>,

    /// URL to the preview image
    #[serde(default)]
    pub preview_url: Option<String>,

    /// URL for remote media
    #[serde(default)]
    pub remote_url: Option<String>,

    /// Metadata about the media
    #[serde(default)]
    pub meta: Option<MediaMeta>,

    /// Alt text description
    #[serde(default)]
    pub description: Option<String>,

    /// Blurhash for placeholder
    #[serde(default)]
    pub blurhash: Option<String>,
}

/// Metadata about a media attachment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaMeta {
    #[serde(default)]
    pub original: Option<MediaDimensions>,
    #[serde(default)]
    pub small: Option<MediaDimensions>,
    #[serde(default)]
    pub focus: Option<MediaFocus>,
}

/// Dimensions of a media file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaDimensions {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub aspect: Option<f64>,
}

/// Focus point for cropping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaFocus {
    pub x: f64,
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_media_type_is_tolerated() {
        let media: MediaAttachment = serde_json::from_value(serde_json::json!({
            "id": "9",
            "type": "hologram",
            "url": null
        }))
        .unwrap();

        assert_eq!(media.media_type, MediaType::Unknown);
        assert!(media.url.is_none());
    }

    #[test]
    fn test_image_with_dimensions() {
        let media: MediaAttachment = serde_json::from_value(serde_json::json!({
            "id": "22",
            "type": "image",
            "url": "https://files.example/original/22.png",
            "preview_url": "https://files.example/small/22.png",
            "description": "a cat",
            "meta": {
                "original": { "width": 640, "height": 480, "size": "640x480", "aspect": 1.3333 },
                "small": { "width": 400, "height": 300 }
            }
        }))
        .unwrap();

        assert_eq!(media.media_type, MediaType::Image);
        assert_eq!(media.description.as_deref(), Some("a cat"));
        let original = media.meta.unwrap().original.unwrap();
        assert_eq!(original.width, Some(640));
        assert_eq!(original.size.as_deref(), Some("640x480"));
    }
}
