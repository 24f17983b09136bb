//! Command line configuration for the `hal` renderer.
//!
//! Every option can also be set through the environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `HAL_INPUT` | stdin | Tagged JSON tree to render |
//! | `HAL_MAPPINGS` | (required) | Mapping definitions (JSON array) |
//! | `HAL_FORMAT` | json | Output format (`json` or `xml`) |
//! | `HAL_PRETTY` | false | Pretty-print JSON output |
//! | `HAL_SELF_URL` | | Document `self` link |
//! | `HAL_FIRST_URL` | | Document `first` link |
//! | `HAL_PREV_URL` | | Document `prev` link |
//! | `HAL_NEXT_URL` | | Document `next` link |
//! | `HAL_LAST_URL` | | Document `last` link |
//! | `HAL_META` | | Comma-separated `key=value` metadata entries |
//! | `HAL_LOG_LEVEL` | warn | Log level |

use clap::{Parser, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;

/// Output format of the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Xml,
}

/// Configuration for one `hal` invocation.
#[derive(Debug, Clone, Parser)]
#[command(name = "hal")]
#[command(about = "Render tagged JSON trees as HAL+JSON or HAL+XML")]
pub struct CliConfig {
    /// Tagged JSON tree to render. Reads stdin when omitted.
    #[arg(short, long, env = "HAL_INPUT")]
    pub input: Option<PathBuf>,

    /// Mapping definitions (JSON array).
    #[arg(short, long, env = "HAL_MAPPINGS")]
    pub mappings: PathBuf,

    /// Output format.
    #[arg(short, long, env = "HAL_FORMAT", value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, env = "HAL_PRETTY", default_value = "false")]
    pub pretty: bool,

    /// Document `self` link.
    #[arg(long, env = "HAL_SELF_URL")]
    pub self_url: Option<String>,

    /// Document `first` link.
    #[arg(long, env = "HAL_FIRST_URL")]
    pub first_url: Option<String>,

    /// Document `prev` link.
    #[arg(long, env = "HAL_PREV_URL")]
    pub prev_url: Option<String>,

    /// Document `next` link.
    #[arg(long, env = "HAL_NEXT_URL")]
    pub next_url: Option<String>,

    /// Document `last` link.
    #[arg(long, env = "HAL_LAST_URL")]
    pub last_url: Option<String>,

    /// Metadata entry as `key=value`. Values that parse as JSON are kept
    /// typed, anything else is a string.
    #[arg(long, env = "HAL_META", value_delimiter = ',')]
    pub meta: Vec<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "HAL_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl CliConfig {
    /// Validates the configuration and returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.mappings.as_os_str().is_empty() {
            errors.push("Mappings path cannot be empty".to_string());
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            errors.push(format!("Unknown log level `{}`", self.log_level));
        }

        if self.pretty && self.format == OutputFormat::Xml {
            errors.push("--pretty only applies to JSON output".to_string());
        }

        for entry in &self.meta {
            if parse_meta(entry).is_none() {
                errors.push(format!("Metadata entry `{}` is not key=value", entry));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Metadata entries in command line order.
    pub fn meta_entries(&self) -> Vec<(String, Value)> {
        self.meta.iter().filter_map(|entry| parse_meta(entry)).collect()
    }
}

/// Splits `key=value`; the value is JSON when it parses as JSON.
pub fn parse_meta(entry: &str) -> Option<(String, Value)> {
    let (key, raw) = entry.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Some((key.to_string(), value))
}
