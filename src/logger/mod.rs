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

//! Logging system for mastodon-mcp
//!
//! stdout carries MCP protocol frames, so console output always goes to
//! stderr. A daily-rotated JSON log file is written alongside unless disabled.

use anyhow::Result;
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Environment variable that turns the log file off (`0` or `false`)
pub const LOG_FILE_ENV: &str = "MASTODON_MCP_LOG_FILE";

/// Logger configuration
pub struct LoggerConfig {
    /// Log directory path
    pub log_dir: PathBuf,
    /// Log file prefix
    pub file_prefix: String,
    /// Maximum log level
    pub level: Level,
    /// Whether to log to stderr
    pub console_output: bool,
    /// Whether to log to file
    pub file_output: bool,
    /// Log rotation strategy
    pub rotation: Rotation,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let log_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mastodon-mcp")
            .join("logs");

        let file_output = std::env::var(LOG_FILE_ENV)
            .map(|v| file_output_enabled(&v))
            .unwrap_or(true);

        Self {
            log_dir,
            file_prefix: "mastodon-mcp".to_string(),
            level: Level::INFO,
            console_output: true,
            file_output,
            rotation: Rotation::DAILY,
        }
    }
}

fn file_output_enabled(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "off")
}

/// Default filter: this crate plus the `api` and `rpc` targets used by the macros below
fn default_filter(level: Level) -> String {
    format!("mastodon_mcp={level},api={level},rpc={level}")
}

/// Main logger struct
pub struct Logger;

impl Logger {
    /// Initialize the logging system with default configuration
    pub fn init() -> Result<()> {
        Self::init_with_config(LoggerConfig::default())
    }

    /// Initialize the logging system with custom configuration
    pub fn init_with_config(config: LoggerConfig) -> Result<()> {
        // Ensure log directory exists
        if config.file_output {
            std::fs::create_dir_all(&config.log_dir)?;
        }

        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(default_filter(config.level))?,
        };

        let subscriber = tracing_subscriber::registry().with(env_filter);

        let file_layer = config.file_output.then(|| {
            let file_appender =
                RollingFileAppender::new(config.rotation, &config.log_dir, &config.file_prefix);

            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE)
                .json()
        });

        let console_layer = config.console_output.then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_span_events(FmtSpan::CLOSE)
        });

        subscriber.with(file_layer).with(console_layer).try_init()?;

        Ok(())
    }
}

/// Log one completed API round trip, whatever its outcome
#[macro_export]
macro_rules! log_api_call {
    ($method:expr, $endpoint:expr, $status:expr, $body:expr) => {
        tracing::info!(
            target: "api",
            method = $method,
            endpoint = $endpoint,
            status = $status,
            body = $body,
            "API call completed"
        )
    };
}

/// Macro for logging MCP messages
#[macro_export]
macro_rules! log_rpc {
    (request, $method:expr, $id:expr) => {
        tracing::debug!(
            target: "rpc",
            direction = "request",
            method = $method,
            id = %$id,
            "RPC request received"
        )
    };
    (response, $method:expr, $id:expr, $success:expr) => {
        tracing::debug!(
            target: "rpc",
            direction = "response",
            method = $method,
            id = %$id,
            success = $success,
            "RPC response sent"
        )
    };
    (notification, $method:expr) => {
        tracing::debug!(
            target: "rpc",
            direction = "notification",
            method = $method,
            "RPC notification received"
        )
    };
}
