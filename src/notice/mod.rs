// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! User-facing notices.
//!
//! ```text
//! Notice::emit
//!   |-- OpLog::append   (info is logged as success)
//!   |-- tracing event   (debug!, level as a field)
//!   '-- stderr          "<level>: message" + details
//! ```

#[cfg(test)]
mod tests;

use crate::error::Result;
use crate::oplog::{EntryKind, LogEntry, OpLog};
use anyhow::Context;
use std::fmt;
use std::io::{BufRead, Write};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    /// Operation log class for this level.
    #[must_use]
    pub const fn entry_kind(self) -> EntryKind {
        match self {
            Self::Info => EntryKind::Success,
            Self::Warning => EntryKind::Warning,
            Self::Error => EntryKind::Error,
        }
    }
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub details: Option<String>,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Operation log entry for this notice.
    #[must_use]
    pub fn to_entry(&self) -> LogEntry {
        let entry = LogEntry::now(self.level.entry_kind(), self.message.clone());
        match &self.details {
            Some(details) => entry.with_details(details.clone()),
            None => entry,
        }
    }

    /// Terminal rendering: `<level>: <message>` then indented details.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!("{}: {}", self.level, self.message);
        if let Some(details) = &self.details {
            for line in details.trim_end().lines() {
                out.push_str("\n  ");
                out.push_str(line);
            }
        }
        out
    }

    /// Record in the operation log, trace it and print it to stderr.
    pub fn emit(&self, oplog: &OpLog) {
        oplog.append(&self.to_entry());

        let details = self.details.as_deref().unwrap_or_default();
        debug!(level = %self.level, details, "{}", self.message);

        eprintln!("{}", self.render());
    }
}

/// Ask `prompt` on stderr and read a yes/no answer from stdin.
///
/// Returns `true` without asking when `assume_yes` is set.
///
/// # Errors
///
/// Returns an error if stdin cannot be read.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let stdin = std::io::stdin();
    confirm_with(prompt, &mut stdin.lock(), &mut std::io::stderr())
}

/// [`confirm`] over arbitrary streams. Anything but `y`/`yes` declines.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn confirm_with(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(output, "{prompt} [y/N] ").context("failed to write prompt")?;
    output.flush().context("failed to flush prompt")?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("failed to read answer")?;

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "proceed"
    ))
}
