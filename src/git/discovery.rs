// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git metadata directory discovery.
//!
//! ```text
//! <root>/.git/                      directory   --> <root>/.git
//! <root>/.git  "gitdir: ../x/wt"    file        --> <root>/../x/wt
//! <git-dir>/commondir "../.."       worktree    --> hooks live in the common dir
//! ```
//!
//! Hook scripts and sentinel files are placed relative to the directory
//! returned here, never relative to the work tree.

use crate::error::{FsError, Result};
use anyhow::Context;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Resolve the git directory of the work tree rooted at `workspace_root`.
///
/// Returns `Ok(None)` when the root has no `.git` entry or the `.git` file
/// carries no `gitdir:` pointer.
///
/// # Errors
///
/// Returns an error if a `.git` file exists but cannot be read.
pub fn resolve_git_dir(workspace_root: &Path) -> Result<Option<PathBuf>> {
    let dot_git = workspace_root.join(".git");
    if dot_git.is_dir() {
        return Ok(Some(dot_git));
    }
    if !dot_git.is_file() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&dot_git).map_err(|e| FsError::from_io(&dot_git, e))?;
    let Some(target) = parse_gitdir_pointer(&content)? else {
        return Ok(None);
    };

    let target = PathBuf::from(target);
    if target.is_absolute() {
        Ok(Some(target))
    } else {
        Ok(Some(workspace_root.join(target)))
    }
}

/// Extract the target of a `gitdir: <path>` line.
pub(crate) fn parse_gitdir_pointer(content: &str) -> Result<Option<String>> {
    let regex = Regex::new(r"(?m)^\s*gitdir:\s*(.+?)\s*$")
        .with_context(|| "failed to compile gitdir regex")?;

    Ok(regex
        .captures(content)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string()))
}

/// Walk up from `start` to the first directory containing a `.git` entry.
#[must_use]
pub fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Directory holding the hook scripts for `git_dir`.
///
/// Linked worktrees share hooks with the main repository through the
/// `commondir` file.
///
/// # Errors
///
/// Returns an error if a `commondir` file exists but cannot be read.
pub fn hooks_dir(git_dir: &Path) -> Result<PathBuf> {
    let commondir = git_dir.join("commondir");
    if !commondir.is_file() {
        return Ok(git_dir.join("hooks"));
    }

    let content =
        std::fs::read_to_string(&commondir).map_err(|e| FsError::from_io(&commondir, e))?;
    let common = PathBuf::from(content.trim());
    let common = if common.is_absolute() {
        common
    } else {
        git_dir.join(common)
    };
    Ok(common.join("hooks"))
}
