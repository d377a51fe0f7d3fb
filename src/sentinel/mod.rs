// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sentinel files dropped by the hooks and the watcher that consumes them.
//!
//! ```text
//! pre-push hook  --touch--> <git-dir>/PUSH_BLOCKED  --.
//! post-merge hook --touch--> <git-dir>/PULL_DETECTED --+
//!                                                      |
//!        SentinelWatcher::run                          v
//!        tokio::select! {                        take(): remove_file
//!            token.cancelled()  --> stop           Ok       --> event
//!            interval.tick()    --> poll_once      NotFound --> nothing
//!            notify (flume)     --> poll_once
//!        }
//! ```
//!
//! A sentinel is reported by whichever caller manages to delete it, so a
//! signal is observed exactly once even with several watchers running.


use crate::config::types::{WatchConfig, WatchMode};
use crate::error::{FsError, Result};
use crate::git::discovery::{find_workspace_root, resolve_git_dir};
use crate::notice::Notice;
use crate::oplog::OpLog;
use notify::{Config as NotifyConfig, RecommendedWatcher, RecursiveMode, Watcher};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Signal files written by the hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentinelKind {
    PushBlocked,
    PullDetected,
}

impl SentinelKind {
    pub const ALL: [Self; 2] = [Self::PushBlocked, Self::PullDetected];

    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::PushBlocked => "PUSH_BLOCKED",
            Self::PullDetected => "PULL_DETECTED",
        }
    }

    /// Notice surfaced when this sentinel is consumed.
    #[must_use]
    pub fn notice(self, marker: &str) -> Notice {
        match self {
            Self::PushBlocked => Notice::error(format!(
                "Push blocked: Found commit with '{marker}' message"
            ))
            .with_details("Please remove or amend the commit before pushing."),
            Self::PullDetected => Notice::warning(format!(
                "Pull detected: Pulled commits include '{marker}'"
            ))
            .with_details("Someone pushed a placeholder commit; check the pulled history."),
        }
    }
}

impl fmt::Display for SentinelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Consume the sentinel `kind` in `git_dir`.
///
/// Returns `true` only if this call deleted the file.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn take(git_dir: &Path, kind: SentinelKind) -> Result<bool> {
    let path = git_dir.join(kind.file_name());
    match std::fs::remove_file(&path) {
        Ok(()) => {
            debug!(path = %path.display(), "sentinel consumed");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(FsError::from_io(&path, e).into()),
    }
}

/// A repository being watched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    pub root: PathBuf,
    pub git_dir: PathBuf,
}

impl WatchTarget {
    /// Resolve the git dir for `path` (or the work tree containing it).
    ///
    /// Returns `Ok(None)` when `path` is not inside a git work tree.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be made absolute or a `.git` file
    /// cannot be read.
    pub fn discover(path: &Path) -> Result<Option<Self>> {
        let path = std::path::absolute(path).map_err(|e| FsError::from_io(path, e))?;
        let Some(root) = find_workspace_root(&path) else {
            return Ok(None);
        };
        Ok(resolve_git_dir(&root)?.map(|git_dir| Self { root, git_dir }))
    }
}

/// A consumed sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelEvent {
    pub root: PathBuf,
    pub kind: SentinelKind,
}

/// Polls the git dirs of one or more repositories for sentinel files.
pub struct SentinelWatcher {
    targets: Vec<WatchTarget>,
    interval: Duration,
    mode: WatchMode,
}

impl SentinelWatcher {
    #[must_use]
    pub fn new(targets: Vec<WatchTarget>, config: &WatchConfig) -> Self {
        Self {
            targets,
            interval: config.interval(),
            mode: config.mode,
        }
    }

    #[must_use]
    pub fn targets(&self) -> &[WatchTarget] {
        &self.targets
    }

    /// Consume every present sentinel once.
    ///
    /// A sentinel that cannot be removed is logged and skipped so one broken
    /// repository does not stop the others.
    #[must_use]
    pub fn poll_once(&self) -> Vec<SentinelEvent> {
        let mut events = Vec::new();
        for target in &self.targets {
            for kind in SentinelKind::ALL {
                match take(&target.git_dir, kind) {
                    Ok(true) => events.push(SentinelEvent {
                        root: target.root.clone(),
                        kind,
                    }),
                    Ok(false) => {}
                    Err(e) => warn!(repo = %target.root.display(), error = %e, "sentinel check failed"),
                }
            }
        }
        events
    }

    /// Watch until `token` is cancelled, surfacing each event as a notice.
    ///
    /// Events are handled inline, so no new poll starts while a notice is
    /// being shown. In notify mode filesystem events on the git dirs wake the
    /// loop early; the interval tick still runs as a fallback, and a notify
    /// backend that fails to start degrades to polling.
    pub async fn run(&self, token: CancellationToken, marker: &str, oplog: &OpLog) -> usize {
        self.run_with(token, |event| {
            info!(repo = %event.root.display(), sentinel = %event.kind, "sentinel detected");
            event.kind.notice(marker).emit(oplog);
        })
        .await
    }

    /// [`run`](Self::run) with a custom event handler. Returns the number of
    /// events handled.
    pub async fn run_with<F>(&self, token: CancellationToken, mut on_event: F) -> usize
    where
        F: FnMut(&SentinelEvent),
    {
        let (tx, rx) = flume::unbounded::<()>();
        // keep the watcher alive for the whole loop
        let _watcher = match self.mode {
            WatchMode::Notify => self.spawn_notify(tx),
            WatchMode::Poll => None,
        };
        let mut notify_open = true;

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            repos = self.targets.len(),
            mode = %self.mode,
            interval = ?self.interval,
            "watching for sentinels"
        );

        let mut handled = 0;
        loop {
            tokio::select! {
                () = token.cancelled() => {
                    debug!("watch cancelled");
                    break;
                }
                _ = interval.tick() => {}
                woke = rx.recv_async(), if notify_open => {
                    if woke.is_err() {
                        trace!("notify channel closed");
                        notify_open = false;
                    }
                    // drain bursts before polling
                    while rx.try_recv().is_ok() {}
                }
            }

            for event in self.poll_once() {
                on_event(&event);
                handled += 1;
            }
        }
        handled
    }

    fn spawn_notify(&self, tx: flume::Sender<()>) -> Option<RecommendedWatcher> {
        let watcher = RecommendedWatcher::new(
            move |res: std::result::Result<notify::Event, notify::Error>| match res {
                Ok(event) => {
                    let is_sentinel = event.paths.iter().any(|p| {
                        p.file_name()
                            .and_then(|n| n.to_str())
                            .is_some_and(|n| SentinelKind::ALL.iter().any(|k| k.file_name() == n))
                    });
                    if is_sentinel {
                        let _ = tx.send(());
                    }
                }
                Err(e) => warn!(error = %e, "watch error"),
            },
            NotifyConfig::default(),
        );

        let mut watcher = match watcher {
            Ok(watcher) => watcher,
            Err(e) => {
                warn!(error = %e, "filesystem notifications unavailable, polling only");
                return None;
            }
        };

        for target in &self.targets {
            if let Err(e) = watcher.watch(&target.git_dir, RecursiveMode::NonRecursive) {
                warn!(path = %target.git_dir.display(), error = %e, "cannot watch git dir");
            }
        }
        Some(watcher)
    }
}
