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

//! Tool catalog exposed to agents
//!
//! Every tool validates its arguments against its declared input schema before
//! touching the filesystem or the network, calls into [`MastodonClient`], and
//! renders the outcome as a single block of text.

pub mod create_post;
pub mod format;
pub mod search;
pub mod timeline;
pub mod trends;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::MastodonClient;
use crate::error::{ToolError, ToolResult};

/// Name, description and JSON Schema of one tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Arguments of a tool, decoded by serde and then range-checked
pub trait ToolArgs: DeserializeOwned {
    /// Constraints serde cannot express (numeric bounds, formats)
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Decode and validate raw tool arguments; null counts as `{}`
pub fn parse_args<T: ToolArgs>(arguments: Value) -> ToolResult<T> {
    let arguments = match arguments {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };

    let args: T = serde_json::from_value(arguments)
        .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
    args.validate().map_err(ToolError::InvalidArguments)?;

    Ok(args)
}

/// Check an integer argument against inclusive bounds
pub(crate) fn check_range(field: &str, value: u32, min: u32, max: u32) -> Result<(), String> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "`{}` must be between {} and {}, got {}",
            field, min, max, value
        ))
    }
}

/// The Mastodon tools bound to one client
#[derive(Clone)]
pub struct MastodonTools {
    client: Arc<MastodonClient>,
}

impl MastodonTools {
    pub fn new(client: MastodonClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Definitions for `tools/list`, in a stable order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            create_post::definition(),
            timeline::definition(),
            trends::definition(),
            search::definition(),
        ]
    }

    /// Run a tool by name
    pub async fn call(&self, name: &str, arguments: Value) -> ToolResult<String> {
        debug!(tool = %name, "Calling tool");

        let result = match name {
            create_post::NAME => create_post::run(&self.client, parse_args(arguments)?).await,
            timeline::NAME => timeline::run(&self.client, parse_args(arguments)?).await,
            trends::NAME => trends::run(&self.client, parse_args(arguments)?).await,
            search::NAME => search::run(&self.client, parse_args(arguments)?).await,
            _ => return Err(ToolError::UnknownTool(name.to_string())),
        };

        if let Err(e) = &result {
            warn!(tool = %name, "Tool failed: {}", e);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default = "default_count")]
        count: u32,
    }

    fn default_count() -> u32 {
        7
    }

    impl ToolArgs for Probe {
        fn validate(&self) -> Result<(), String> {
            check_range("count", self.count, 1, 10)
        }
    }

    #[test]
    fn test_null_arguments_use_defaults() {
        let probe: Probe = parse_args(Value::Null).unwrap();
        assert_eq!(probe.count, 7);
    }

    #[test]
    fn test_range_violation_is_invalid_arguments() {
        let err = parse_args::<Probe>(json!({ "count": 11 })).err().unwrap();
        assert!(matches!(err, ToolError::InvalidArguments(ref m) if m.contains("between 1 and 10")));
    }

    #[test]
    fn test_type_violation_is_invalid_arguments() {
        let err = parse_args::<Probe>(json!({ "count": "many" })).err().unwrap();
        assert!(matches!(err, ToolError::InvalidArguments(_)));

        let err = parse_args::<Probe>(json!({ "count": 2.5 })).err().unwrap();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_catalog_and_unknown_tool() {
        let tools = MastodonTools::new(MastodonClient::new("http://127.0.0.1:9", "t").unwrap());

        let names: Vec<_> = tools.definitions().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "mastodon_create_toot",
                "mastodon_get_timeline",
                "mastodon_get_trending_tags",
                "mastodon_search"
            ]
        );

        for definition in tools.definitions() {
            assert_eq!(definition.input_schema["type"], "object");
        }

        let err = tools.call("mastodon_delete_everything", json!({})).await.err().unwrap();
        assert!(matches!(err, ToolError::UnknownTool(_)));
    }
}
