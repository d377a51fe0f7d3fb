// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Hook command implementation for dcjs-rs.

use crate::cli::hooks::{HooksArgs, HooksSubcommand};
use crate::config::Config;
use crate::error::{FsError, HookError, Result};
use crate::git::discovery::find_workspace_root;
use crate::hooks::{
    HookOutcome, HookSettings, HookState, HookStatus, hook_status, install_hooks, uninstall_hooks,
};
use std::path::{Path, PathBuf};

/// Main handler for the hooks command.
///
/// # Errors
///
/// Returns `HookError::NotARepository` outside a git work tree, or an error
/// if a hook file cannot be read or written.
pub fn run_hooks_command(args: &HooksArgs, config: &Config, repo: &Path, dry_run: bool) -> Result<()> {
    let root = workspace_root(repo)?;
    let repo = root.as_path();
    match args.subcommand {
        HooksSubcommand::Install if dry_run => {
            for status in statuses(repo)? {
                let action = match status.state {
                    HookState::Installed => "update",
                    HookState::Foreign => "add a block to",
                    HookState::Missing => "create",
                };
                println!("Would {action} {}", status.path.display());
            }
            Ok(())
        }
        HooksSubcommand::Install => {
            let paths = updated(install_hooks(repo, &HookSettings::from(config))?, repo)?;
            for path in paths {
                println!("Installed {}", path.display());
            }
            Ok(())
        }
        HooksSubcommand::Uninstall if dry_run => {
            for status in statuses(repo)? {
                if status.state == HookState::Installed {
                    println!("Would remove the block from {}", status.path.display());
                }
            }
            Ok(())
        }
        HooksSubcommand::Uninstall => {
            let paths = updated(uninstall_hooks(repo)?, repo)?;
            if paths.is_empty() {
                println!("No hook blocks to remove");
            }
            for path in paths {
                println!("Removed block from {}", path.display());
            }
            Ok(())
        }
        HooksSubcommand::Status => {
            for status in statuses(repo)? {
                println!(
                    "{:<11} {:<40} {}",
                    status.kind.to_string(),
                    status.state.to_string(),
                    status.path.display()
                );
            }
            Ok(())
        }
    }
}

/// The work tree containing `repo`, or `repo` itself when there is none.
fn workspace_root(repo: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(repo).map_err(|e| FsError::from_io(repo, e))?;
    Ok(find_workspace_root(&absolute).unwrap_or(absolute))
}

fn not_a_repository(repo: &Path) -> HookError {
    HookError::NotARepository {
        path: repo.display().to_string(),
    }
}

fn statuses(repo: &Path) -> Result<Vec<HookStatus>> {
    hook_status(repo)?.ok_or_else(|| not_a_repository(repo).into())
}

fn updated(outcome: HookOutcome, repo: &Path) -> Result<Vec<PathBuf>> {
    match outcome {
        HookOutcome::Updated(paths) => Ok(paths),
        HookOutcome::NotARepository => Err(not_a_repository(repo).into()),
    }
}

/// Install hooks for every root, skipping the ones that are not repositories.
///
/// Used by `watch` when `watch.install_hooks` is set.
///
/// # Errors
///
/// Returns an error if a hook cannot be written.
pub fn ensure_hooks<'a>(roots: impl IntoIterator<Item = &'a Path>, config: &Config) -> Result<usize> {
    let settings = HookSettings::from(config);
    let mut installed = 0;
    for root in roots {
        if let HookOutcome::Updated(paths) = install_hooks(root, &settings)? {
            installed += paths.len();
        }
    }
    tracing::debug!(installed, "hooks ensured");
    Ok(installed)
}
