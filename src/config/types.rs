// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! Config: GlobalConfig, MarkerConfig, WatchConfig, HooksConfig, OplogConfig
//! WatchMode: Poll | Notify (default)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Placeholder message used when none is configured.
pub const DEFAULT_MARKER_MESSAGE: &str = "DONT COMMIT JUST SAVE";

/// File name of the markdown operation log inside the temp directory.
pub const DEFAULT_OPLOG_NAME: &str = "dont-commit-just-save.md";

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log what would be done without touching the repository.
    pub dry: bool,
    /// Log level for stderr output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to the diagnostic log file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
        }
    }
}

/// Placeholder commit message settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerConfig {
    /// Text that flags a commit as "don't actually commit this".
    pub message: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_MARKER_MESSAGE.to_string(),
        }
    }
}

impl MarkerConfig {
    /// Check that the message can be embedded in a double-quoted shell string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty message or one that
    /// contains a newline, `"`, `\`, `$` or a backtick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::InvalidValue {
            section: "marker".to_string(),
            key: "message".to_string(),
            message: message.to_string(),
        };

        if self.message.trim().is_empty() {
            return Err(invalid("message must not be empty"));
        }
        if let Some(c) = self
            .message
            .chars()
            .find(|c| matches!(c, '"' | '\\' | '$' | '`' | '\n' | '\r'))
        {
            return Err(invalid(&format!(
                "message must not contain {c:?}, it is embedded in hook scripts"
            )));
        }
        Ok(())
    }
}

/// How the watcher learns about new sentinel files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchMode {
    /// Fixed-interval polling only.
    Poll,
    /// Filesystem notifications, with polling as a backstop.
    #[default]
    Notify,
}

impl std::fmt::Display for WatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Poll => write!(f, "poll"),
            Self::Notify => write!(f, "notify"),
        }
    }
}

impl std::str::FromStr for WatchMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "poll" => Ok(Self::Poll),
            "notify" => Ok(Self::Notify),
            _ => Err(ConfigError::InvalidValue {
                section: "watch".to_string(),
                key: "mode".to_string(),
                message: format!("expected 'poll' or 'notify', got '{s}'"),
            }),
        }
    }
}

/// Sentinel watcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatchConfig {
    /// Polling interval in milliseconds.
    pub interval_ms: u64,
    /// Notification strategy.
    pub mode: WatchMode,
    /// Install hooks into every watched repository on start.
    pub install_hooks: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            mode: WatchMode::default(),
            install_hooks: true,
        }
    }
}

impl WatchConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Hook script settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HooksConfig {
    /// Commits inspected by post-merge when `ORIG_HEAD` is missing.
    pub pull_fallback_depth: u32,
    /// Print the boxed banner when a push is blocked.
    pub banner: bool,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            pull_fallback_depth: 5,
            banner: true,
        }
    }
}

/// Markdown operation log settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OplogConfig {
    /// Log location, defaults to the system temp directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl OplogConfig {
    /// Configured path, or `<temp dir>/dont-commit-just-save.md`.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_OPLOG_NAME))
    }
}
