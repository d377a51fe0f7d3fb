// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commit listing relative to the upstream branch.
//!
//! ```text
//!   base = merge-base HEAD @{u}
//!     |
//!     o---o---o---o  HEAD
//!         \__________/
//!       unpushed_commits (oldest first, full messages)
//! ```

use crate::error::{DcjsResult, GitError};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::cmd::{git_command, git_raw};

/// Unit separator between hash and message in `git log` output.
const FIELD_SEP: char = '\x1f';
/// Record separator between commits in `git log` output.
const RECORD_SEP: char = '\x1e';

/// A commit hash with its full message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub hash: String,
    pub message: String,
}

impl CommitInfo {
    /// First line of the message.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    /// Abbreviated hash for display.
    #[must_use]
    pub fn short_hash(&self) -> &str {
        short_hash(&self.hash)
    }
}

/// First 8 characters of `hash`, or all of it when shorter.
#[must_use]
pub fn short_hash(hash: &str) -> &str {
    hash.get(..8).unwrap_or(hash)
}

/// Upstream of the current branch (e.g. `origin/main`), if one is configured.
///
/// # Errors
///
/// Never fails for a missing upstream; errors only propagate from process
/// spawning.
pub fn upstream(repo_path: &Path) -> DcjsResult<Option<String>> {
    match git_command(
        &["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"],
        repo_path,
    ) {
        Ok(name) if !name.is_empty() => Ok(Some(name)),
        Ok(_) => Ok(None),
        Err(e) if e.as_git().is_some() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Best common ancestor of two revisions.
///
/// # Errors
///
/// Returns a `GitError` if the revisions share no history.
pub fn merge_base(repo_path: &Path, a: &str, b: &str) -> DcjsResult<String> {
    git_command(&["merge-base", a, b], repo_path)
}

/// Commits in `base..HEAD`, oldest first, with full messages.
///
/// # Errors
///
/// Returns a `GitError` if `git log` fails.
pub fn unpushed_commits(repo_path: &Path, base: &str) -> DcjsResult<Vec<CommitInfo>> {
    let range = format!("{base}..HEAD");
    let format = "--format=%H%x1f%B%x1e";
    let raw = git_raw(&["log", "--reverse", format, &range], repo_path)?;
    Ok(parse_log_records(&String::from_utf8_lossy(&raw)))
}

/// Parse `%H%x1f%B%x1e` records.
pub(crate) fn parse_log_records(raw: &str) -> Vec<CommitInfo> {
    raw.split(RECORD_SEP)
        .filter_map(|record| {
            let (hash, message) = record.trim_start().split_once(FIELD_SEP)?;
            let hash = hash.trim();
            if hash.is_empty() {
                return None;
            }
            Some(CommitInfo {
                hash: hash.to_string(),
                message: message.trim_end().to_string(),
            })
        })
        .collect()
}

/// Number of merge commits in `base..HEAD`.
///
/// # Errors
///
/// Returns a `GitError` if `git rev-list` fails or prints a non-number.
pub fn merge_commit_count(repo_path: &Path, base: &str) -> DcjsResult<usize> {
    let range = format!("{base}..HEAD");
    let count = git_command(&["rev-list", "--merges", "--count", &range], repo_path)?;
    count.parse().map_err(|_| {
        GitError::CommandFailed {
            command: format!("git rev-list --merges --count {range}"),
            message: format!("unexpected output: {count}"),
        }
        .into()
    })
}

/// Binary patch of a single commit against its parent.
///
/// # Errors
///
/// Returns a `GitError` if `hash` does not name a commit.
pub fn commit_patch(repo_path: &Path, hash: &str) -> DcjsResult<Vec<u8>> {
    git_raw(
        &[
            "diff-tree",
            "-p",
            "--binary",
            "--full-index",
            "--no-commit-id",
            "--root",
            hash,
        ],
        repo_path,
    )
}
