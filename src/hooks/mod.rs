// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git hook installation.
//!
//! ```text
//! <git-dir>/hooks/pre-push            <git-dir>/hooks/post-merge
//! #!/bin/sh                           #!/bin/sh
//!
//! # DONT-COMMIT-JUST-SAVE BEGIN       # DONT-COMMIT-JUST-SAVE BEGIN
//! ...  placeholder in pushed range?   ...  placeholder pulled in?
//!      touch PUSH_BLOCKED; exit 1          touch PULL_DETECTED
//! # DONT-COMMIT-JUST-SAVE END         # DONT-COMMIT-JUST-SAVE END
//!
//! (existing hook content kept)        (existing hook content kept)
//! ```
//!
//! Only the marked block is owned by this tool. Upserting replaces the block
//! in place; uninstalling removes it and deletes files left with nothing but
//! a shebang.

pub mod script;

#[cfg(test)]
mod tests;

use crate::config::Config;
use crate::config::types::DEFAULT_MARKER_MESSAGE;
use crate::error::{FsError, HookError, Result};
use crate::git::discovery::{hooks_dir, resolve_git_dir};
use anyhow::Context;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const MARKER_START: &str = "# DONT-COMMIT-JUST-SAVE BEGIN";
pub const MARKER_END: &str = "# DONT-COMMIT-JUST-SAVE END";

const SHEBANG: &str = "#!/bin/sh";

/// Values baked into the generated blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSettings {
    pub message: String,
    pub pull_fallback_depth: u32,
    pub banner: bool,
}

impl Default for HookSettings {
    fn default() -> Self {
        Self {
            message: DEFAULT_MARKER_MESSAGE.to_string(),
            pull_fallback_depth: 5,
            banner: true,
        }
    }
}

impl From<&Config> for HookSettings {
    fn from(config: &Config) -> Self {
        Self {
            message: config.marker().to_string(),
            pull_fallback_depth: config.hooks.pull_fallback_depth,
            banner: config.hooks.banner,
        }
    }
}

/// Hooks managed by this tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    PrePush,
    PostMerge,
}

impl HookKind {
    pub const ALL: [Self; 2] = [Self::PrePush, Self::PostMerge];

    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::PrePush => "pre-push",
            Self::PostMerge => "post-merge",
        }
    }

    /// Block body for this hook, without markers.
    #[must_use]
    pub fn block(self, settings: &HookSettings) -> String {
        match self {
            Self::PrePush => script::pre_push_block(settings),
            Self::PostMerge => script::post_merge_block(settings),
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Installation state of one hook file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookState {
    /// File exists and carries the marked block.
    Installed,
    /// File exists without the marked block.
    Foreign,
    /// No hook file.
    Missing,
}

impl fmt::Display for HookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Installed => "installed",
            Self::Foreign => "not installed (foreign hook present)",
            Self::Missing => "not installed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookStatus {
    pub kind: HookKind,
    pub path: PathBuf,
    pub state: HookState,
}

/// Result of an install or uninstall over a workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// Hook files touched, in `HookKind::ALL` order.
    Updated(Vec<PathBuf>),
    /// The workspace root is not a git work tree; nothing was done.
    NotARepository,
}

fn check_workspace(workspace_root: &Path) -> Result<()> {
    if workspace_root.as_os_str().is_empty()
        || workspace_root.to_string_lossy().trim().is_empty()
    {
        return Err(HookError::InvalidWorkspace.into());
    }
    Ok(())
}

fn hook_dir_for(workspace_root: &Path) -> Result<Option<PathBuf>> {
    check_workspace(workspace_root)?;
    let Some(git_dir) = resolve_git_dir(workspace_root)? else {
        debug!(root = %workspace_root.display(), "no git dir, skipping hooks");
        return Ok(None);
    };
    hooks_dir(&git_dir).map(Some)
}

/// Install or refresh the `pre-push` and `post-merge` blocks.
///
/// # Errors
///
/// Returns `HookError::InvalidWorkspace` for an empty root, or an error if a
/// hook file cannot be read or written.
pub fn install_hooks(workspace_root: &Path, settings: &HookSettings) -> Result<HookOutcome> {
    let Some(dir) = hook_dir_for(workspace_root)? else {
        return Ok(HookOutcome::NotARepository);
    };

    std::fs::create_dir_all(&dir).map_err(|e| FsError::from_io(&dir, e))?;

    let mut written = Vec::with_capacity(HookKind::ALL.len());
    for kind in HookKind::ALL {
        let path = dir.join(kind.file_name());
        upsert_hook_block(&path, &kind.block(settings))
            .with_context(|| format!("failed to install {kind} hook"))?;
        info!(hook = %kind, path = %path.display(), "hook installed");
        written.push(path);
    }
    Ok(HookOutcome::Updated(written))
}

/// Remove the marked blocks, deleting hook files that end up empty.
///
/// # Errors
///
/// Returns an error if a hook file cannot be read, written or removed.
pub fn uninstall_hooks(workspace_root: &Path) -> Result<HookOutcome> {
    let Some(dir) = hook_dir_for(workspace_root)? else {
        return Ok(HookOutcome::NotARepository);
    };

    let mut touched = Vec::new();
    for kind in HookKind::ALL {
        let path = dir.join(kind.file_name());
        if !path.is_file() {
            continue;
        }
        let content = read_hook(&path)?;
        let Some(stripped) = remove_block(&content)? else {
            continue;
        };

        if stripped.trim().is_empty() || stripped.trim() == SHEBANG {
            std::fs::remove_file(&path).map_err(|e| FsError::from_io(&path, e))?;
            info!(hook = %kind, "hook removed");
        } else {
            write_hook(&path, &stripped)?;
            info!(hook = %kind, "hook block removed, foreign content kept");
        }
        touched.push(path);
    }
    Ok(HookOutcome::Updated(touched))
}

/// Report the state of each managed hook.
///
/// Returns `None` when the workspace is not a git work tree.
///
/// # Errors
///
/// Returns an error if a hook file exists but cannot be read.
pub fn hook_status(workspace_root: &Path) -> Result<Option<Vec<HookStatus>>> {
    let Some(dir) = hook_dir_for(workspace_root)? else {
        return Ok(None);
    };

    HookKind::ALL
        .into_iter()
        .map(|kind| {
            let path = dir.join(kind.file_name());
            let state = if path.is_file() {
                if read_hook(&path)?.contains(MARKER_START) {
                    HookState::Installed
                } else {
                    HookState::Foreign
                }
            } else {
                HookState::Missing
            };
            Ok(HookStatus { kind, path, state })
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Insert or replace the marked block in the hook at `path`.
///
/// # Errors
///
/// Returns an error if the hook cannot be read or written.
pub fn upsert_hook_block(path: &Path, block: &str) -> Result<()> {
    let existing = if path.is_file() {
        Some(read_hook(path)?)
    } else {
        None
    };
    let content = upsert_block(existing.as_deref(), block)?;
    write_hook(path, &content)
}

/// Line ending used by `content`.
fn detect_newline(content: &str) -> &'static str {
    if content.contains("\r\n") { "\r\n" } else { "\n" }
}

/// Block body wrapped in markers, using `newline` throughout.
fn marked_block(block: &str, newline: &str) -> String {
    let body = block.lines().collect::<Vec<_>>().join(newline);
    format!("{MARKER_START}{newline}{body}{newline}{MARKER_END}")
}

/// Compute new hook content with the block inserted or replaced.
///
/// A missing file starts from a shebang; content without one gets it
/// prepended. A new block goes right after the first line.
///
/// # Errors
///
/// Returns an error if the block pattern fails to compile.
pub fn upsert_block(existing: Option<&str>, block: &str) -> Result<String> {
    let (mut content, newline) = match existing {
        Some(text) => (text.to_string(), detect_newline(text)),
        None => (format!("{SHEBANG}\n"), "\n"),
    };

    if !content.starts_with("#!") {
        content = format!("{SHEBANG}{newline}{content}");
    }

    let marked = marked_block(block, newline);
    let regex = Regex::new(&format!(
        r"(?s){}.*?{}\s*",
        regex::escape(MARKER_START),
        regex::escape(MARKER_END)
    ))
    .with_context(|| "failed to compile hook block regex")?;

    if let Some(found) = regex.find(&content) {
        content.replace_range(found.range(), &format!("{marked}{newline}{newline}"));
    } else {
        let insert_at = content.find('\n').map_or(content.len(), |i| i + 1);
        content.insert_str(insert_at, &format!("{newline}{marked}{newline}{newline}"));
    }

    Ok(content)
}

/// Strip the marked block, the blank line before it and the whitespace
/// after it. Returns `None` when no block is present.
///
/// # Errors
///
/// Returns an error if the block pattern fails to compile.
pub fn remove_block(content: &str) -> Result<Option<String>> {
    let regex = Regex::new(&format!(
        r"(?s)(?:\r?\n)?{}.*?{}\s*",
        regex::escape(MARKER_START),
        regex::escape(MARKER_END)
    ))
    .with_context(|| "failed to compile hook block regex")?;

    if !regex.is_match(content) {
        return Ok(None);
    }
    Ok(Some(regex.replace(content, "").into_owned()))
}

fn read_hook(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| FsError::from_io(path, e))
        .with_context(|| format!("failed to read hook {}", path.display()))
}

fn write_hook(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| HookError::WriteFailed {
        path: path.display().to_string(),
        source,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = std::fs::metadata(path)
            .map_err(|e| FsError::from_io(path, e))?
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms).map_err(|e| FsError::from_io(path, e))?;
    }

    Ok(())
}
