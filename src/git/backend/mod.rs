// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend (pure Rust gix)
//! GitMutation (write) --> ShellBackend (git CLI)
//!
//! ShellBackend::run
//!   which("git") (cached)
//!   LC_ALL=C, GIT_TERMINAL_PROMPT=0, GCM_INTERACTIVE=never
//!        |
//!        v
//!   classify: conflict markers --> GitError::Conflict
//!             non-zero exit    --> GitError::CommandFailed
//! ```

use crate::error::{DcjsResult, GitError, GixError, ProcessError};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Output fragments that mean git stopped on a conflict.
const CONFLICT_MARKERS: [&str; 4] = [
    "patch failed:",
    "patch does not apply",
    "Merge conflict marker encountered",
    "CONFLICT",
];

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
pub trait GitQuery {
    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or head resolution fails.
    fn current_branch(path: &Path) -> DcjsResult<Option<String>>;

    /// Check for staged or unstaged changes to tracked files.
    ///
    /// Untracked files are ignored, they survive a hard reset untouched.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or status check fails.
    fn has_uncommitted_changes(path: &Path) -> DcjsResult<bool>;

    /// Full hash of the commit HEAD points at.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if HEAD cannot be resolved (e.g. unborn branch).
    fn head_commit(path: &Path) -> DcjsResult<String>;

    /// Absolute git metadata directory for the work tree containing `path`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `path` is not inside a repository.
    fn git_dir(path: &Path) -> DcjsResult<PathBuf>;

    /// Top-level directory of the work tree containing `path`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` for bare repositories or paths outside a work tree.
    fn work_tree(path: &Path) -> DcjsResult<PathBuf>;
}

// --- Mutation Trait (Write operations) ---

/// Git mutation operations that modify repository state.
pub trait GitMutation {
    /// Stage every change in the work tree, including untracked files.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git add` fails.
    fn add_all(repo_path: &Path) -> DcjsResult<()>;

    /// Commit the index with `message` used verbatim.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if there is nothing to commit or a hook rejects it.
    fn commit(repo_path: &Path, message: &str) -> DcjsResult<()>;

    /// Move the branch, index and work tree to `target`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `target` does not resolve.
    fn reset_hard(repo_path: &Path, target: &str) -> DcjsResult<()>;

    /// Replay a single commit on top of HEAD.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Conflict` if the commit does not apply cleanly.
    fn cherry_pick(repo_path: &Path, commit: &str) -> DcjsResult<()>;

    /// Abort an in-progress cherry-pick.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if no cherry-pick is in progress.
    fn cherry_pick_abort(repo_path: &Path) -> DcjsResult<()>;

    /// Apply a patch file to both index and work tree.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Conflict` if the patch does not apply.
    fn apply_to_index(repo_path: &Path, patch: &Path) -> DcjsResult<()>;

    /// Stash tracked changes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the stash cannot be created.
    fn stash_push(repo_path: &Path, message: &str) -> DcjsResult<()>;

    /// Restore and drop the newest stash entry.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Conflict` if the stash does not apply cleanly.
    fn stash_pop(repo_path: &Path) -> DcjsResult<()>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Provides read-only operations without spawning subprocesses.
pub struct GixBackend;

impl GitQuery for GixBackend {
    fn current_branch(path: &Path) -> DcjsResult<Option<String>> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn has_uncommitted_changes(path: &Path) -> DcjsResult<bool> {
        use gix::status::UntrackedFiles;

        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        if repo.workdir().is_none() {
            return Err(GitError::Gix(GixError::BareRepository).into());
        }

        let has_changes = repo
            .status(gix::progress::Discard)
            .map_err(|_| GitError::CommandFailed {
                command: "status".to_string(),
                message: "failed to prepare status check".to_string(),
            })?
            .untracked_files(UntrackedFiles::None)
            .into_iter(None)
            .map_err(|_| GitError::CommandFailed {
                command: "status".to_string(),
                message: "failed to check repository status".to_string(),
            })?
            .next()
            .is_some();

        Ok(has_changes)
    }

    fn head_commit(path: &Path) -> DcjsResult<String> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let id = repo.head_id().map_err(|e| GitError::CommandFailed {
            command: "rev-parse HEAD".to_string(),
            message: e.to_string(),
        })?;
        Ok(id.to_string())
    }

    fn git_dir(path: &Path) -> DcjsResult<PathBuf> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let git_dir = repo.git_dir();
        if git_dir.is_absolute() {
            Ok(git_dir.to_path_buf())
        } else {
            Ok(std::path::absolute(git_dir)?)
        }
    }

    fn work_tree(path: &Path) -> DcjsResult<PathBuf> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let workdir = repo
            .workdir()
            .ok_or(GitError::Gix(GixError::BareRepository))?;
        Ok(std::path::absolute(workdir)?)
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using the git CLI.
///
/// Every history-changing step goes through here so that hooks, config and
/// the user's git version behave exactly as on the command line.
pub struct ShellBackend;

/// Captured result of a successful git invocation.
pub(crate) struct GitOutput {
    pub(crate) stdout: Vec<u8>,
}

impl GitOutput {
    /// Stdout as trimmed, lossily decoded text.
    pub(crate) fn text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).trim().to_string()
    }
}

/// Resolve the git executable once per process.
fn git_executable() -> DcjsResult<&'static Path> {
    static GIT: OnceLock<Option<PathBuf>> = OnceLock::new();
    GIT.get_or_init(|| which::which("git").ok())
        .as_deref()
        .ok_or_else(|| {
            ProcessError::ExecutableNotFound {
                name: "git".to_string(),
            }
            .into()
        })
}

/// Find conflict details in git output.
///
/// Conflict markers on stderr always count. On stdout they only count when
/// the command failed, since `git log` output may legitimately contain them.
pub(crate) fn conflict_details(stderr: &str, stdout: &str, failed: bool) -> Option<String> {
    let has_marker = |text: &str| CONFLICT_MARKERS.iter().any(|m| text.contains(m));

    if has_marker(stderr) || (failed && has_marker(stdout)) {
        let details = [stdout.trim(), stderr.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        Some(details)
    } else {
        None
    }
}

impl ShellBackend {
    /// Run git and return raw stdout.
    pub(crate) fn run(args: &[&str], cwd: &Path) -> DcjsResult<GitOutput> {
        let command = format!("git {}", args.join(" "));
        debug!(cwd = %cwd.display(), cmd = %command, "exec");

        let output = Command::new(git_executable()?)
            .args(args)
            .current_dir(cwd)
            .env("LC_ALL", "C")
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|source| ProcessError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let failed = !output.status.success();

        if let Some(details) =
            conflict_details(&stderr, &String::from_utf8_lossy(&output.stdout), failed)
        {
            return Err(GitError::Conflict { command, details }.into());
        }

        if failed {
            return Err(GitError::CommandFailed {
                command,
                message: stderr.trim().to_string(),
            }
            .into());
        }

        trace!(cmd = %command, bytes = output.stdout.len(), "done");
        Ok(GitOutput {
            stdout: output.stdout,
        })
    }

    /// Run git and return trimmed stdout.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> DcjsResult<String> {
        Self::run(args, cwd).map(|output| output.text())
    }
}

fn path_arg<'a>(path: &'a Path, command: &str) -> DcjsResult<&'a str> {
    path.to_str().ok_or_else(|| {
        GitError::CommandFailed {
            command: command.to_string(),
            message: format!("non UTF-8 path: {}", path.display()),
        }
        .into()
    })
}

impl GitMutation for ShellBackend {
    fn add_all(repo_path: &Path) -> DcjsResult<()> {
        Self::git_command(&["add", "--all"], repo_path)?;
        Ok(())
    }

    fn commit(repo_path: &Path, message: &str) -> DcjsResult<()> {
        Self::git_command(
            &["commit", "--quiet", "--cleanup=verbatim", "-m", message],
            repo_path,
        )?;
        Ok(())
    }

    fn reset_hard(repo_path: &Path, target: &str) -> DcjsResult<()> {
        Self::git_command(&["reset", "--hard", "--quiet", target], repo_path)?;
        Ok(())
    }

    fn cherry_pick(repo_path: &Path, commit: &str) -> DcjsResult<()> {
        Self::git_command(&["cherry-pick", "--allow-empty", commit], repo_path)?;
        Ok(())
    }

    fn cherry_pick_abort(repo_path: &Path) -> DcjsResult<()> {
        Self::git_command(&["cherry-pick", "--abort"], repo_path)?;
        Ok(())
    }

    fn apply_to_index(repo_path: &Path, patch: &Path) -> DcjsResult<()> {
        let patch = path_arg(patch, "git apply")?;
        Self::git_command(&["apply", "--index", "--whitespace=nowarn", patch], repo_path)?;
        Ok(())
    }

    fn stash_push(repo_path: &Path, message: &str) -> DcjsResult<()> {
        Self::git_command(&["stash", "push", "--quiet", "-m", message], repo_path)?;
        Ok(())
    }

    fn stash_pop(repo_path: &Path) -> DcjsResult<()> {
        Self::git_command(&["stash", "pop", "--quiet"], repo_path)?;
        Ok(())
    }
}
