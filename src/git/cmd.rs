// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command operations using shell backend.
//!
//! ```text
//! cmd.rs --> ShellBackend --> git (LC_ALL=C, no prompts)
//! ```

use crate::error::DcjsResult;
use std::path::Path;

use super::backend::{GitMutation, GitOutput, ShellBackend};

/// Run git and return trimmed stdout.
pub(super) fn git_command(args: &[&str], cwd: &Path) -> DcjsResult<String> {
    ShellBackend::git_command(args, cwd)
}

/// Run git and return stdout untouched (patches, NUL-delimited output).
pub(super) fn git_raw(args: &[&str], cwd: &Path) -> DcjsResult<Vec<u8>> {
    ShellBackend::run(args, cwd).map(|GitOutput { stdout }| stdout)
}

/// Stage all changes, untracked files included.
///
/// # Errors
///
/// Returns a `GitError` if `git add` fails.
pub fn add_all(repo_path: &Path) -> DcjsResult<()> {
    ShellBackend::add_all(repo_path)
}

/// Commit the index with a verbatim message.
///
/// # Errors
///
/// Returns a `GitError` if the commit fails (nothing staged, hook rejection).
pub fn commit(repo_path: &Path, message: &str) -> DcjsResult<()> {
    ShellBackend::commit(repo_path, message)
}

/// Hard reset to `target`.
///
/// # Errors
///
/// Returns a `GitError` if `target` does not resolve.
pub fn reset_hard(repo_path: &Path, target: &str) -> DcjsResult<()> {
    ShellBackend::reset_hard(repo_path, target)
}

/// Cherry-pick a single commit.
///
/// # Errors
///
/// Returns `GitError::Conflict` when the pick stops on a conflict.
pub fn cherry_pick(repo_path: &Path, commit: &str) -> DcjsResult<()> {
    ShellBackend::cherry_pick(repo_path, commit)
}

/// Abort an in-progress cherry-pick.
///
/// # Errors
///
/// Returns a `GitError` if there is nothing to abort.
pub fn cherry_pick_abort(repo_path: &Path) -> DcjsResult<()> {
    ShellBackend::cherry_pick_abort(repo_path)
}

/// Apply a patch file to index and work tree.
///
/// # Errors
///
/// Returns `GitError::Conflict` when the patch does not apply.
pub fn apply_to_index(repo_path: &Path, patch: &Path) -> DcjsResult<()> {
    ShellBackend::apply_to_index(repo_path, patch)
}

/// Stash tracked changes.
///
/// # Errors
///
/// Returns a `GitError` if the stash cannot be created.
pub fn stash_push(repo_path: &Path, message: &str) -> DcjsResult<()> {
    ShellBackend::stash_push(repo_path, message)
}

/// Pop the newest stash entry.
///
/// # Errors
///
/// Returns `GitError::Conflict` when the stash does not apply cleanly.
pub fn stash_pop(repo_path: &Path) -> DcjsResult<()> {
    ShellBackend::stash_pop(repo_path)
}
