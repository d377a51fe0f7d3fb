// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `watch`: surface blocked pushes and flagged pulls.
//!
//! ```text
//! REPO... --> WatchTarget::discover --> (install hooks) --> SentinelWatcher
//!   --once  : poll_once, emit, exit
//!   default : run until Ctrl-C
//! ```

use crate::cli::watch::WatchArgs;
use crate::cmd::hooks::ensure_hooks;
use crate::config::Config;
use crate::error::{Result, bail_out};
use crate::oplog::OpLog;
use crate::sentinel::{SentinelWatcher, WatchTarget};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Resolve the repositories to watch, skipping paths outside a work tree.
///
/// # Errors
///
/// Returns an error if a `.git` file cannot be read, or if no path is a
/// repository.
pub fn resolve_targets(paths: &[PathBuf]) -> Result<Vec<WatchTarget>> {
    let mut targets: Vec<WatchTarget> = Vec::with_capacity(paths.len());
    for path in paths {
        match WatchTarget::discover(path)? {
            Some(target) if targets.contains(&target) => {}
            Some(target) => targets.push(target),
            None => warn!(path = %path.display(), "not a git repository, skipped"),
        }
    }
    if targets.is_empty() {
        return Err(bail_out("no git repository to watch").into());
    }
    Ok(targets)
}

/// Watch the given repositories (or `default_repo`) for sentinel files.
///
/// Returns the number of sentinels handled.
///
/// # Errors
///
/// Returns an error if no repository can be watched or hook installation
/// fails.
pub async fn run_watch_command(
    args: &WatchArgs,
    config: &Config,
    default_repo: &Path,
    dry_run: bool,
) -> Result<usize> {
    let paths = if args.repos.is_empty() {
        vec![default_repo.to_path_buf()]
    } else {
        args.repos.clone()
    };
    let targets = resolve_targets(&paths)?;

    if config.watch.install_hooks && !dry_run {
        ensure_hooks(targets.iter().map(|t| t.root.as_path()), config)?;
    }

    let mut watch_config = config.watch.clone();
    if let Some(mode) = args.mode {
        watch_config.mode = mode.into();
    }
    let watcher = SentinelWatcher::new(targets, &watch_config);
    let oplog = OpLog::from_config(config);
    let marker = config.marker();

    if args.once {
        let events = watcher.poll_once();
        for event in &events {
            event.kind.notice(marker).emit(&oplog);
        }
        if events.is_empty() {
            println!("No blocked push or flagged pull");
        }
        return Ok(events.len());
    }

    let token = CancellationToken::new();
    let stop = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupted");
            stop.cancel();
        }
    });

    println!(
        "Watching {} repositor{}, press Ctrl-C to stop",
        watcher.targets().len(),
        if watcher.targets().len() == 1 { "y" } else { "ies" }
    );
    let handled = watcher.run(token, marker, &oplog).await;
    info!(handled, "watch stopped");
    Ok(handled)
}
