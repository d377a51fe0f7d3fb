// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `save`: commit with the placeholder message.

use crate::cli::watch::SaveArgs;
use crate::config::Config;
use crate::error::Result;
use crate::git::commits::short_hash;
use crate::git::{cmd, query};
use anyhow::Context;
use std::path::Path;
use tracing::info;

/// Commit all changes (or only the staged ones) with the placeholder message.
///
/// Returns the new HEAD, or `None` for a dry run.
///
/// # Errors
///
/// Returns an error if `repo` is not a work tree or git refuses the commit,
/// for example because there is nothing to commit.
pub fn run_save_command(
    args: &SaveArgs,
    config: &Config,
    repo: &Path,
    dry_run: bool,
) -> Result<Option<String>> {
    let root = query::work_tree(repo)?;
    let marker = config.marker();

    if dry_run {
        let what = if args.staged { "staged changes" } else { "all changes" };
        println!("Would commit {what} in {} as '{marker}'", root.display());
        return Ok(None);
    }

    if !args.staged {
        cmd::add_all(&root)?;
    }
    cmd::commit(&root, marker).context("nothing saved")?;

    let head = query::head_commit(&root)?;
    info!(commit = %head, "saved");
    println!("Saved {} '{marker}'", short_hash(&head));
    Ok(Some(head))
}
