// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Markdown operation log.
//!
//! ```text
//! # DONT COMMIT JUST SAVE - Operation Log
//!
//! ⚠️ WARNING - Warning: This operation can be risky! - 2026-10-18 12:00:00
//! ✅ 2026-10-18 12:00:01 - git reset --hard 1a2b3c (14ms)
//! ✅ 2026-10-18 12:00:01 - git cherry-pick --allow-empty 4d5e6f (22ms)
//! ❌ ERROR - Reset blocked: Conflicts detected - 2026-10-18 12:00:02
//!    > CONFLICT (content): Merge conflict in a.txt
//! ```
//!
//! The file is recreated whenever the risky-operation warning is logged, so
//! it always describes the latest rewrite. Write failures are reported through
//! `tracing` and never abort the caller.


use crate::config::Config;
use crate::error::{FsError, Result};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Header written when the log is (re)created.
pub const LOG_HEADER: &str = "# DONT COMMIT JUST SAVE - Operation Log\n\n";

/// Message that starts a new operation and resets the log.
pub const RISKY_WARNING: &str = "Warning: This operation can be risky!";

/// Outcome class of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Success,
    Warning,
    Error,
}

impl EntryKind {
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Warning => "⚠️",
            Self::Error => "❌",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "SUCCESS",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        })
    }
}

/// One line (plus optional detail lines) of the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: String,
    pub kind: EntryKind,
    pub message: String,
    pub details: Option<String>,
    pub command: Option<String>,
    pub duration: Option<Duration>,
}

impl LogEntry {
    /// Entry stamped with the current local time.
    #[must_use]
    pub fn now(kind: EntryKind, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp_now(),
            kind,
            message: message.into(),
            details: None,
            command: None,
            duration: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>, duration: Duration) -> Self {
        self.command = Some(command.into());
        self.duration = Some(duration);
        self
    }

    /// Render as markdown, terminated by a newline.
    #[must_use]
    pub fn render(&self) -> String {
        let icon = self.kind.icon();
        let mut out = match &self.command {
            Some(command) => {
                let ms = self.duration.unwrap_or_default().as_millis();
                format!("{icon} {} - {command} ({ms}ms)\n", self.timestamp)
            }
            None => format!(
                "{icon} {} - {} - {}\n",
                self.kind, self.message, self.timestamp
            ),
        };

        if let Some(details) = self.details.as_deref().filter(|d| !d.trim().is_empty()) {
            for line in details.trim_end().lines() {
                out.push_str("   > ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

/// Local time in a sortable, human-readable form.
#[must_use]
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Whether a git command belongs in the log.
#[must_use]
pub fn is_logged_command(command: &str) -> bool {
    command.contains("reset") || command.contains("cherry-pick")
}

/// Handle to the markdown log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpLog {
    path: PathBuf,
}

impl OpLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.oplog.resolved_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an entry, recreating the file first for the risky warning.
    pub fn append(&self, entry: &LogEntry) {
        let mut result = Ok(());
        if entry.message.contains(RISKY_WARNING) {
            result = self.reset();
        }
        if result.is_ok() {
            result = self.write_line(&entry.render());
        }

        if let Err(e) = result {
            warn!(path = %self.path.display(), error = %e, "failed to write operation log");
        }
    }

    /// Record a git command if it is a reset or cherry-pick.
    ///
    /// `failure` carries the error text of a failed command.
    pub fn record_command(&self, command: &str, duration: Duration, failure: Option<&str>) {
        if !is_logged_command(command) {
            return;
        }
        let entry = match failure {
            None => LogEntry::now(EntryKind::Success, "Command executed successfully"),
            Some(error) => LogEntry::now(EntryKind::Error, "Command failed").with_details(error),
        };
        self.append(&entry.with_command(command, duration));
    }

    /// Full log content.
    ///
    /// # Errors
    ///
    /// Returns an error if the log does not exist or cannot be read.
    pub fn read(&self) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .map_err(|e| FsError::from_io(&self.path, e).into())
    }

    fn reset(&self) -> Result<()> {
        std::fs::write(&self.path, LOG_HEADER).map_err(|e| FsError::from_io(&self.path, e))?;
        Ok(())
    }

    fn write_line(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| FsError::from_io(&self.path, e))?;

        // fresh file gets the header
        if file.metadata().map(|m| m.len() == 0).unwrap_or(false) {
            file.write_all(LOG_HEADER.as_bytes())
                .map_err(|e| FsError::from_io(&self.path, e))?;
        }
        file.write_all(line.as_bytes())
            .map_err(|e| FsError::from_io(&self.path, e))?;
        Ok(())
    }
}
