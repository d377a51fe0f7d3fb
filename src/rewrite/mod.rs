// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! History rewrite: separate placeholder commits from real ones.
//!
//! ```text
//! before:  base -- N1 -- F1 -- N2 -- F2      (HEAD, unpushed N*/F*)
//!
//! split:   reset --hard base
//!          cherry-pick N1, N2                (normal, in order)
//!          apply --index diff(F1), diff(F2)  (flagged, left staged)
//!
//! after:   base -- N1' -- N2'  + index: F1+F2
//!
//! undo:    stash (if dirty), reset --hard base,
//!          cherry-pick N1, N2, F1, F2, stash pop (if stashed)
//! ```
//!
//! Any failed step aborts a pending cherry-pick and resets the branch to
//! where it was before the operation started.

pub mod history;


use crate::error::{DcjsError, DcjsResult, GitError, HistoryError, Result, bail_out};
use crate::git::{cmd, commits, query};
use crate::notice::Notice;
use crate::oplog::OpLog;
use anyhow::Context;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{debug, info, warn};

use commits::CommitInfo;
use history::{ResetHistory, ResetRecord};

/// Unpushed commits split by whether their message carries the placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    /// Oldest first.
    pub normal: Vec<CommitInfo>,
    /// Oldest first.
    pub flagged: Vec<CommitInfo>,
}

/// Partition `commits` by substring match of `marker` in the full message.
#[must_use]
pub fn classify(commits: Vec<CommitInfo>, marker: &str) -> Classified {
    let (flagged, normal): (Vec<_>, Vec<_>) = commits
        .into_iter()
        .partition(|commit| commit.message.contains(marker));
    Classified { normal, flagged }
}

/// Everything needed to run a split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    pub repo_path: PathBuf,
    pub git_dir: PathBuf,
    pub branch: String,
    pub upstream: String,
    pub base: String,
    pub original_head: String,
    pub commits: Classified,
}

impl SplitPlan {
    /// Nothing to separate.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.commits.flagged.is_empty()
    }

    /// Number of rewrite steps (reset plus one per commit).
    #[must_use]
    pub fn step_count(&self) -> u64 {
        step_count(self.commits.normal.len() + self.commits.flagged.len())
    }
}

/// Inspect the current branch and describe the split.
///
/// # Errors
///
/// Returns `GitError::DetachedHead`, `GitError::NoUpstream` or
/// `GitError::MergeCommits` when the branch cannot be split, or any git error
/// from the inspection itself.
pub fn plan_split(repo_path: &Path, marker: &str) -> Result<SplitPlan> {
    let repo_path = &query::work_tree(repo_path)?;
    let path = repo_path.display().to_string();
    let branch = query::current_branch(repo_path)?
        .ok_or_else(|| GitError::DetachedHead { path: path.clone() })?;
    let upstream = commits::upstream(repo_path)?.ok_or_else(|| GitError::NoUpstream {
        branch: branch.clone(),
    })?;

    let base = commits::merge_base(repo_path, "HEAD", "@{u}")
        .with_context(|| format!("failed to find merge base with {upstream}"))?;
    let merges = commits::merge_commit_count(repo_path, &base)?;
    if merges > 0 {
        return Err(GitError::MergeCommits {
            branch,
            count: merges,
        }
        .into());
    }

    let unpushed = commits::unpushed_commits(repo_path, &base)?;
    let plan = SplitPlan {
        repo_path: repo_path.to_path_buf(),
        git_dir: query::git_dir(repo_path)?,
        branch,
        upstream,
        base,
        original_head: query::head_commit(repo_path)?,
        commits: classify(unpushed, marker),
    };
    debug!(
        normal = plan.commits.normal.len(),
        flagged = plan.commits.flagged.len(),
        base = %plan.base,
        "split planned"
    );
    Ok(plan)
}

/// Progress length for a reset followed by `commits` steps.
fn step_count(commits: usize) -> u64 {
    u64::try_from(commits + 1).unwrap_or(u64::MAX)
}

fn step_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-")
        })
        .clone()
}

/// Runs git steps, timing them into the operation log and driving a
/// progress bar.
struct Rewriter<'a> {
    repo_path: &'a Path,
    oplog: &'a OpLog,
    bar: ProgressBar,
}

impl<'a> Rewriter<'a> {
    fn new(repo_path: &'a Path, oplog: &'a OpLog, steps: u64, show_progress: bool) -> Self {
        let bar = if show_progress {
            let bar = ProgressBar::new(steps);
            bar.set_style(step_style());
            bar
        } else {
            ProgressBar::hidden()
        };
        Self {
            repo_path,
            oplog,
            bar,
        }
    }

    /// Run one git step, record it and advance the bar.
    fn step<F>(&self, command: String, run: F) -> DcjsResult<()>
    where
        F: FnOnce(&Path) -> DcjsResult<()>,
    {
        self.bar.set_message(command.clone());
        let started = Instant::now();
        let result = run(self.repo_path);
        let failure = result.as_ref().err().map(ToString::to_string);
        self.oplog
            .record_command(&command, started.elapsed(), failure.as_deref());
        if result.is_ok() {
            self.bar.inc(1);
        }
        result
    }

    fn reset_hard(&self, target: &str) -> DcjsResult<()> {
        self.step(format!("git reset --hard {target}"), |repo| {
            cmd::reset_hard(repo, target)
        })
    }

    fn cherry_pick(&self, commit: &str) -> DcjsResult<()> {
        self.step(format!("git cherry-pick --allow-empty {commit}"), |repo| {
            cmd::cherry_pick(repo, commit)
        })
    }

    /// Stage the changes of `commit` without committing them.
    fn apply_staged(&self, commit: &CommitInfo) -> DcjsResult<()> {
        self.step(format!("git apply --index ({})", commit.short_hash()), |repo| {
            let patch = commits::commit_patch(repo, &commit.hash)?;
            if patch.iter().all(u8::is_ascii_whitespace) {
                debug!(commit = %commit.short_hash(), "empty commit, nothing to stage");
                return Ok(());
            }
            let mut file = tempfile::Builder::new()
                .prefix("dcjs-")
                .suffix(".patch")
                .tempfile()?;
            file.write_all(&patch)?;
            file.flush()?;
            cmd::apply_to_index(repo, file.path())
        })
    }

    /// Put the branch back to `head` after a failed step.
    fn recover(&self, head: &str) {
        // nothing to abort is the common case
        let _ = cmd::cherry_pick_abort(self.repo_path);
        if let Err(e) = self.reset_hard(head) {
            warn!(head, error = %e, "failed to restore branch");
        }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Surface a conflict as the dedicated notice.
fn report_failure(err: &DcjsError, oplog: &OpLog) {
    if let Some(GitError::Conflict { details, .. }) = err.as_git() {
        Notice::error("Reset blocked: Conflicts detected")
            .with_details(format!(
                "The operation was blocked because it would cause conflicts.\n\nDetails:\n{details}\n\nPlease resolve conflicts manually before proceeding."
            ))
            .emit(oplog);
    }
}

fn run_split(rewriter: &Rewriter<'_>, plan: &SplitPlan) -> DcjsResult<()> {
    rewriter.reset_hard(&plan.base)?;
    for commit in &plan.commits.normal {
        rewriter.cherry_pick(&commit.hash)?;
    }
    for commit in &plan.commits.flagged {
        rewriter.apply_staged(commit)?;
    }
    Ok(())
}

fn run_undo(rewriter: &Rewriter<'_>, record: &ResetRecord) -> DcjsResult<()> {
    rewriter.reset_hard(&record.base)?;
    for commit in record.normal.iter().chain(&record.flagged) {
        rewriter.cherry_pick(commit)?;
    }
    Ok(())
}

/// Rewrite the branch as described by `plan` and record it in the history.
///
/// Requires a clean work tree (untracked files are fine). On failure the
/// branch is restored to `plan.original_head`.
///
/// # Errors
///
/// Returns `GitError::UncommittedChanges` for a dirty work tree, a bail-out
/// when there is nothing to split, `HistoryError::Corrupt` (before the branch
/// is touched) for an unreadable history, or the git error of the failed step.
pub fn execute_split(plan: &SplitPlan, oplog: &OpLog, show_progress: bool) -> Result<ResetRecord> {
    if plan.is_noop() {
        return Err(bail_out("no unpushed commits carry the placeholder message").into());
    }
    if query::has_uncommitted_changes(&plan.repo_path)? {
        return Err(GitError::UncommittedChanges {
            path: plan.repo_path.display().to_string(),
        }
        .into());
    }

    let history_path = ResetHistory::path_for(&plan.git_dir);
    let mut history = ResetHistory::load(&history_path)?;

    let rewriter = Rewriter::new(&plan.repo_path, oplog, plan.step_count(), show_progress);
    if let Err(err) = run_split(&rewriter, plan) {
        rewriter.recover(&plan.original_head);
        rewriter.finish();
        report_failure(&err, oplog);
        return Err(anyhow::Error::new(err).context("split failed, branch restored"));
    }
    rewriter.finish();

    let record = match record_split(plan, &mut history, &history_path) {
        Ok(record) => record,
        Err(err) => {
            rewriter.recover(&plan.original_head);
            return Err(err.context("failed to record split, branch restored"));
        }
    };

    info!(
        branch = %record.branch,
        flagged = record.flagged.len(),
        normal = record.normal.len(),
        "split complete"
    );
    Ok(record)
}

/// Push the finished split onto `history` and persist it.
fn record_split(plan: &SplitPlan, history: &mut ResetHistory, path: &Path) -> Result<ResetRecord> {
    let record = ResetRecord {
        timestamp: Utc::now(),
        branch: plan.branch.clone(),
        repo_path: plan.repo_path.clone(),
        base: plan.base.clone(),
        original_head: plan.original_head.clone(),
        rewritten_head: query::head_commit(&plan.repo_path)?,
        normal: plan.commits.normal.iter().map(|c| c.hash.clone()).collect(),
        flagged: plan.commits.flagged.iter().map(|c| c.hash.clone()).collect(),
    };
    history.add(record.clone());
    history.save(path)?;
    Ok(record)
}

/// Re-apply the commits of `record` on top of its base.
///
/// Local changes are stashed first and popped afterwards. Unless `force` is
/// set, HEAD must still be the head the split produced.
///
/// # Errors
///
/// Returns `HistoryError::Diverged` when the branch moved, or the git error
/// of the failed step (the branch is then restored to where it was).
pub fn undo(record: &ResetRecord, force: bool, oplog: &OpLog, show_progress: bool) -> Result<()> {
    match restore(record, force, oplog, show_progress)? {
        Some(err) => Err(stash_error(err)),
        None => Ok(()),
    }
}

/// Rewrite the branch back to `record`.
///
/// `Ok(Some(_))` means the history is back but the stashed local changes
/// did not pop.
fn restore(
    record: &ResetRecord,
    force: bool,
    oplog: &OpLog,
    show_progress: bool,
) -> Result<Option<DcjsError>> {
    let repo = record.repo_path.as_path();
    let head = query::head_commit(repo)?;
    if head != record.rewritten_head && !force {
        return Err(HistoryError::Diverged {
            expected: record.rewritten_head.clone(),
            actual: head,
        }
        .into());
    }

    let stashed = query::has_uncommitted_changes(repo)?;
    if stashed {
        cmd::stash_push(repo, "dcjs: undo split")?;
        debug!("local changes stashed");
    }

    let steps = step_count(record.normal.len() + record.flagged.len());
    let rewriter = Rewriter::new(repo, oplog, steps, show_progress);
    if let Err(err) = run_undo(&rewriter, record) {
        rewriter.recover(&head);
        rewriter.finish();
        if stashed && let Err(e) = cmd::stash_pop(repo) {
            warn!(error = %e, "stash kept after failed undo, run `git stash pop`");
        }
        report_failure(&err, oplog);
        return Err(anyhow::Error::new(err).context("undo failed, branch restored"));
    }
    rewriter.finish();
    info!(branch = %record.branch, "split undone");

    if stashed && let Err(err) = cmd::stash_pop(repo) {
        report_failure(&err, oplog);
        return Ok(Some(err));
    }
    Ok(None)
}

fn stash_error(err: DcjsError) -> anyhow::Error {
    anyhow::Error::new(err).context("history restored but the stash did not apply")
}

/// Undo the history entry at `index` and drop it from the history.
///
/// # Errors
///
/// Returns `HistoryError::NotFound` for a bad index, or any error from
/// [`undo`]. The entry is kept when the branch was not rewritten; a stash
/// that fails to pop after the rewrite still drops it.
pub fn undo_at(
    git_dir: &Path,
    index: usize,
    force: bool,
    oplog: &OpLog,
    show_progress: bool,
) -> Result<ResetRecord> {
    let history_path = ResetHistory::path_for(git_dir);
    let mut history = ResetHistory::load(&history_path)?;
    let record = history
        .get(index)
        .cloned()
        .ok_or(HistoryError::NotFound {
            index,
            len: history.len(),
        })?;

    let stash_failure = restore(&record, force, oplog, show_progress)?;

    history.remove(index)?;
    history.save(&history_path)?;
    match stash_failure {
        Some(err) => Err(stash_error(err)),
        None => Ok(record),
    }
}
