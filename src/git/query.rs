// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git query operations using gix backend.
//!
//! ```text
//! query.rs --> GixBackend --> .git/ (no subprocess)
//! ```
//!
//! Cheap checks run before every rewrite step and on every watcher start,
//! so they stay in-process.

use crate::error::DcjsResult;
use std::path::{Path, PathBuf};

use super::backend::{GitQuery, GixBackend};

/// Get current branch name (None if HEAD is detached).
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or head resolution fails.
pub fn current_branch(path: &Path) -> DcjsResult<Option<String>> {
    GixBackend::current_branch(path)
}

/// Check for staged or unstaged changes to tracked files.
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or status check fails.
pub fn has_uncommitted_changes(path: &Path) -> DcjsResult<bool> {
    GixBackend::has_uncommitted_changes(path)
}

/// Full hash of the commit HEAD points at.
///
/// # Errors
///
/// Returns a `GitError` if HEAD cannot be resolved.
pub fn head_commit(path: &Path) -> DcjsResult<String> {
    GixBackend::head_commit(path)
}

/// Absolute git metadata directory, where hooks drop sentinel files.
///
/// # Errors
///
/// Returns a `GitError` if `path` is not inside a repository.
pub fn git_dir(path: &Path) -> DcjsResult<PathBuf> {
    GixBackend::git_dir(path)
}

/// Top-level directory of the work tree. Patches and resets run from here.
///
/// # Errors
///
/// Returns a `GitError` for bare repositories or paths outside a work tree.
pub fn work_tree(path: &Path) -> DcjsResult<PathBuf> {
    GixBackend::work_tree(path)
}
