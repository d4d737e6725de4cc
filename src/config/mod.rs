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

//! Credential resolution
//!
//! The server needs exactly two values: the instance base URL and an access
//! token. The token comes from the environment directly, or from the output of
//! a secret-manager command (for example `op read "op://Vault/Mastodon/token"`).

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::ConfigError;

pub const INSTANCE_URL_ENV: &str = "MASTODON_INSTANCE_URL";
pub const ACCESS_TOKEN_ENV: &str = "MASTODON_ACCESS_TOKEN";
pub const TOKEN_COMMAND_ENV: &str = "MASTODON_TOKEN_COMMAND";

/// Instance used when none is configured
pub const DEFAULT_INSTANCE_URL: &str = "https://floss.social";

/// Resolved connection settings
#[derive(Clone)]
pub struct Config {
    pub instance_url: String,
    pub access_token: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Resolve settings from the process environment
    pub async fn load() -> Result<Self, ConfigError> {
        Self::resolve(|key| std::env::var(key).ok()).await
    }

    /// Resolve settings through an arbitrary variable lookup
    pub async fn resolve<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let instance_url = lookup(INSTANCE_URL_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_INSTANCE_URL.to_string());

        let access_token = match lookup(ACCESS_TOKEN_ENV).filter(|v| !v.trim().is_empty()) {
            Some(token) => token.trim().to_string(),
            None => match lookup(TOKEN_COMMAND_ENV).filter(|v| !v.trim().is_empty()) {
                Some(command) => run_token_command(&command).await?,
                None => return Err(ConfigError::MissingToken),
            },
        };

        info!("Using Mastodon instance {}", instance_url);

        Ok(Self {
            instance_url,
            access_token,
        })
    }
}

/// Run a shell command and take its trimmed stdout as the token
async fn run_token_command(command: &str) -> Result<String, ConfigError> {
    debug!("Reading access token from {}", TOKEN_COMMAND_ENV);

    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .output()
        .await
        .map_err(|e| ConfigError::TokenCommand(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ConfigError::TokenCommand(format!(
            "exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(ConfigError::MissingToken);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio_test::{assert_err, assert_ok};

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[tokio::test]
    async fn test_token_from_environment() {
        let config = assert_ok!(
            Config::resolve(lookup(&[
                (INSTANCE_URL_ENV, "https://mastodon.example"),
                (ACCESS_TOKEN_ENV, " abc123\n"),
            ]))
            .await
        );

        assert_eq!(config.instance_url, "https://mastodon.example");
        assert_eq!(config.access_token, "abc123");
    }

    #[tokio::test]
    async fn test_default_instance() {
        let config = assert_ok!(Config::resolve(lookup(&[(ACCESS_TOKEN_ENV, "t")])).await);
        assert_eq!(config.instance_url, DEFAULT_INSTANCE_URL);
    }

    #[tokio::test]
    async fn test_missing_token() {
        let err = assert_err!(Config::resolve(lookup(&[])).await);
        assert!(matches!(err, ConfigError::MissingToken));
    }

    #[tokio::test]
    async fn test_token_from_command() {
        let config = assert_ok!(
            Config::resolve(lookup(&[(TOKEN_COMMAND_ENV, "echo from-secret-store")])).await
        );
        assert_eq!(config.access_token, "from-secret-store");
    }

    #[tokio::test]
    async fn test_failing_token_command() {
        let err = assert_err!(Config::resolve(lookup(&[(TOKEN_COMMAND_ENV, "exit 3")])).await);
        assert!(matches!(err, ConfigError::TokenCommand(_)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config {
            instance_url: "https://floss.social".to_string(),
            access_token: "secret".to_string(),
        };
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
