// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for dcjs-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. dcjs.toml in the repository root (optional)
//! 3. --config FILE (repeatable)
//! 4. DCJS_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! DCJS_GLOBAL__DRY=true           → global.dry = true
//! DCJS_MARKER__MESSAGE="WIP SAVE" → marker.message = "WIP SAVE"
//! DCJS_WATCH__INTERVAL_MS=250     → watch.interval_ms = 250
//! ```
//!
//! # Example
//!
//! ```toml
//! [marker]
//! message = "DONT COMMIT JUST SAVE"
//!
//! [watch]
//! interval_ms = 100
//! mode = "notify"
//!
//! [hooks]
//! pull_fallback_depth = 5
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GlobalConfig, HooksConfig, MarkerConfig, OplogConfig, WatchConfig};

/// Name of the per-repository configuration file.
pub const CONFIG_FILE_NAME: &str = "dcjs.toml";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "DCJS";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Placeholder commit message.
    pub marker: MarkerConfig,
    /// Sentinel watcher.
    pub watch: WatchConfig,
    /// Hook scripts.
    pub hooks: HooksConfig,
    /// Markdown operation log.
    pub oplog: OplogConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dcjs_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("dcjs.toml")
    ///     .with_env_prefix("DCJS")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// The placeholder commit message.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker.message
    }

    /// Validate cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unusable marker message, a
    /// zero polling interval or a zero pull fallback depth.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.marker.validate()?;
        if self.watch.interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                section: "watch".to_string(),
                key: "interval_ms".to_string(),
                message: "interval must be at least 1 ms".to_string(),
            });
        }
        if self.hooks.pull_fallback_depth == 0 {
            return Err(ConfigError::InvalidValue {
                section: "hooks".to_string(),
                key: "pull_fallback_depth".to_string(),
                message: "depth must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Format configuration options for display, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert("global.dry", self.global.dry.to_string());
        options.insert(
            "global.output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file",
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("marker.message", self.marker.message.clone());
        options.insert("watch.interval_ms", self.watch.interval_ms.to_string());
        options.insert("watch.mode", self.watch.mode.to_string());
        options.insert("watch.install_hooks", self.watch.install_hooks.to_string());
        options.insert(
            "hooks.pull_fallback_depth",
            self.hooks.pull_fallback_depth.to_string(),
        );
        options.insert("hooks.banner", self.hooks.banner.to_string());
        options.insert(
            "oplog.path",
            self.oplog.resolved_path().display().to_string(),
        );

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
