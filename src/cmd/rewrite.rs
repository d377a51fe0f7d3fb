// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! History rewrite commands: status, split, history, undo.
//!
//! ```text
//! status  --> plan_split --> print
//! split   --> plan_split --> print --> risky warning --> confirm --> execute_split
//! undo    --> history[i] --> print --> risky warning --> confirm --> undo_at
//! ```

use crate::cli::rewrite::{SplitArgs, UndoArgs};
use crate::config::Config;
use crate::error::{HistoryError, Result};
use crate::git::commits::{CommitInfo, short_hash};
use crate::git::query;
use crate::notice::{Notice, confirm};
use crate::oplog::{OpLog, RISKY_WARNING};
use crate::rewrite::history::{ResetHistory, ResetRecord};
use crate::rewrite::{SplitPlan, execute_split, plan_split, undo_at};
use std::path::Path;

fn print_commits(title: &str, commits: &[CommitInfo]) {
    println!("{title} ({}):", commits.len());
    for commit in commits {
        println!("  {} {}", commit.short_hash(), commit.subject());
    }
}

fn print_plan(plan: &SplitPlan) {
    println!(
        "Branch {} tracking {} (base {})",
        plan.branch,
        plan.upstream,
        short_hash(&plan.base)
    );
    print_commits("Normal commits", &plan.commits.normal);
    print_commits("Placeholder commits", &plan.commits.flagged);
}

/// List unpushed commits, split by whether they carry the placeholder.
///
/// # Errors
///
/// Returns an error if the branch has no upstream, is detached or contains
/// merge commits.
pub fn run_status_command(config: &Config, repo: &Path) -> Result<()> {
    let plan = plan_split(repo, config.marker())?;
    print_plan(&plan);
    Ok(())
}

/// Split placeholder commits out of the unpushed history.
///
/// # Errors
///
/// Returns an error if the split cannot be planned or a git step fails (the
/// branch is restored in that case).
pub fn run_split_command(args: &SplitArgs, config: &Config, repo: &Path, dry_run: bool) -> Result<()> {
    let marker = config.marker();
    let plan = plan_split(repo, marker)?;
    print_plan(&plan);

    if plan.is_noop() {
        println!("Nothing to split: no unpushed commit carries '{marker}'");
        return Ok(());
    }
    if dry_run {
        println!(
            "Would reset to {} and leave {} placeholder commit(s) staged",
            short_hash(&plan.base),
            plan.commits.flagged.len()
        );
        return Ok(());
    }

    let oplog = OpLog::from_config(config);
    Notice::warning(RISKY_WARNING)
        .with_details(format!(
            "Rewriting {} unpushed commit(s) on {}.",
            plan.commits.normal.len() + plan.commits.flagged.len(),
            plan.branch
        ))
        .emit(&oplog);

    if !confirm("Proceed with the split?", args.yes)? {
        println!("Aborted");
        return Ok(());
    }

    let record = execute_split(&plan, &oplog, !args.no_progress)?;
    Notice::info(format!(
        "Reset complete: {} placeholder commit(s) left staged on {}",
        record.flagged.len(),
        record.branch
    ))
    .with_details("Run `dcjs undo` to restore the previous history.")
    .emit(&oplog);
    Ok(())
}

fn load_history(repo: &Path) -> Result<ResetHistory> {
    let git_dir = query::git_dir(repo)?;
    ResetHistory::load(&ResetHistory::path_for(&git_dir))
}

fn print_record(index: usize, record: &ResetRecord) {
    println!("{index}: {}", record.summary());
    println!(
        "   {}..{} -> {}",
        short_hash(&record.base),
        short_hash(&record.original_head),
        short_hash(&record.rewritten_head)
    );
}

/// List recorded splits, newest first.
///
/// # Errors
///
/// Returns an error if the history file is unreadable.
pub fn run_history_command(repo: &Path) -> Result<()> {
    let history = load_history(repo)?;
    if history.is_empty() {
        println!("No recorded splits");
    }
    for (index, record) in history.entries().enumerate() {
        print_record(index, record);
    }
    Ok(())
}

/// Restore the history from before a recorded split.
///
/// # Errors
///
/// Returns `HistoryError::NotFound` for a bad index, `HistoryError::Diverged`
/// if the branch moved (unless `--force`), or the error of a failed git step.
pub fn run_undo_command(args: &UndoArgs, config: &Config, repo: &Path, dry_run: bool) -> Result<()> {
    let git_dir = query::git_dir(repo)?;
    let history = ResetHistory::load(&ResetHistory::path_for(&git_dir))?;
    let record = history.get(args.index).ok_or(HistoryError::NotFound {
        index: args.index,
        len: history.len(),
    })?;
    print_record(args.index, record);

    if dry_run {
        println!(
            "Would reset to {} and re-apply {} commit(s)",
            short_hash(&record.base),
            record.normal.len() + record.flagged.len()
        );
        return Ok(());
    }

    let oplog = OpLog::from_config(config);
    Notice::warning(RISKY_WARNING)
        .with_details(format!("Restoring the history of {}.", record.branch))
        .emit(&oplog);

    if !confirm("Restore the history from before this split?", args.yes)? {
        println!("Aborted");
        return Ok(());
    }

    let restored = undo_at(&git_dir, args.index, args.force, &oplog, !args.no_progress)?;
    Notice::info(format!(
        "Successfully restored reset from {}",
        restored
            .timestamp
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
    ))
    .emit(&oplog);
    Ok(())
}
