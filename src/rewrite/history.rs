// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bounded stack of completed splits.
//!
//! ```text
//! add()  --> [newest, ..., oldest]  --> evict past MAX_HISTORY
//!             index 0 is the newest
//! <git-dir>/dont-commit-just-save/history.json
//! ```

use crate::error::{FsError, HistoryError, Result};
use anyhow::Context;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Entries kept before the oldest is evicted.
pub const MAX_HISTORY: usize = 10;

/// Directory under the git dir holding persisted state.
pub const STATE_DIR: &str = "dont-commit-just-save";

const HISTORY_FILE: &str = "history.json";

/// One completed split, enough to put the original history back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetRecord {
    pub timestamp: DateTime<Utc>,
    pub branch: String,
    pub repo_path: PathBuf,
    /// Last pushed commit the split was rebuilt on.
    pub base: String,
    pub original_head: String,
    pub rewritten_head: String,
    /// Normal commits, oldest first.
    pub normal: Vec<String>,
    /// Flagged commits, oldest first.
    pub flagged: Vec<String>,
}

impl ResetRecord {
    /// One-line summary for listings.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Reset on {} - {} flagged, {} normal commit(s) on {}",
            self.timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S"),
            self.flagged.len(),
            self.normal.len(),
            self.branch
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetHistory {
    entries: VecDeque<ResetRecord>,
}

impl ResetHistory {
    /// Location of the history file for `git_dir`.
    #[must_use]
    pub fn path_for(git_dir: &Path) -> PathBuf {
        git_dir.join(STATE_DIR).join(HISTORY_FILE)
    }

    /// Load from `path`; a missing file is an empty history.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Corrupt` if the file is not valid history JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(FsError::from_io(path, e).into()),
        };

        let mut history: Self =
            serde_json::from_str(&content).map_err(|e| HistoryError::Corrupt {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        history.entries.truncate(MAX_HISTORY);
        debug!(path = %path.display(), entries = history.len(), "history loaded");
        Ok(history)
    }

    /// Write atomically to `path`, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .with_context(|| format!("history path has no parent: {}", path.display()))?;
        std::fs::create_dir_all(dir).map_err(|e| FsError::from_io(dir, e))?;

        let json = serde_json::to_string_pretty(self).context("failed to serialize history")?;
        let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| FsError::from_io(dir, e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| FsError::from_io(file.path(), e))?;
        file.persist(path)
            .map_err(|e| FsError::from_io(path, e.error))?;
        Ok(())
    }

    /// Push `record` as the newest entry, evicting the oldest past the cap.
    pub fn add(&mut self, record: ResetRecord) {
        self.entries.push_front(record);
        self.entries.truncate(MAX_HISTORY);
    }

    /// Entry at `index` (0 = newest).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ResetRecord> {
        self.entries.get(index)
    }

    /// Remove and return the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::NotFound` for an out-of-range index.
    pub fn remove(&mut self, index: usize) -> std::result::Result<ResetRecord, HistoryError> {
        let len = self.entries.len();
        self.entries
            .remove(index)
            .ok_or(HistoryError::NotFound { index, len })
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &ResetRecord> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
