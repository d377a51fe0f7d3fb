// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the installed hooks.
//!
//! Real pushes and pulls against a bare remote, with the hooks run by git.

#![cfg(unix)]

use dcjs_rs::config::types::WatchConfig;
use dcjs_rs::hooks::{HookOutcome, HookSettings, install_hooks, uninstall_hooks};
use dcjs_rs::sentinel::{SentinelKind, SentinelWatcher, WatchTarget};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const MARKER: &str = "DONT COMMIT JUST SAVE";

fn git_output(args: &[&str], cwd: &Path) -> Output {
    Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("failed to run git")
}

fn git(args: &[&str], cwd: &Path) {
    let output = git_output(args, cwd);
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn configure(dir: &Path) {
    git(&["config", "user.email", "test@test.com"], dir);
    git(&["config", "user.name", "Test"], dir);
    git(&["config", "pull.rebase", "false"], dir);
}

fn commit(dir: &Path, file: &str, message: &str) {
    fs::write(dir.join(file), message).unwrap();
    git(&["add", "--all"], dir);
    git(&["commit", "-q", "-m", message], dir);
}

/// A bare remote and a clone of it with one pushed commit.
fn remote_and_clone() -> (TempDir, TempDir) {
    let remote = tempfile::tempdir().unwrap();
    git(&["init", "-q", "--bare"], remote.path());

    let local = tempfile::tempdir().unwrap();
    git(&["init", "-q"], local.path());
    configure(local.path());
    commit(local.path(), "README.md", "initial");
    git(
        &["remote", "add", "origin", remote.path().to_str().unwrap()],
        local.path(),
    );
    git(&["push", "-q", "-u", "origin", "HEAD"], local.path());
    (remote, local)
}

fn install(dir: &Path) {
    let outcome = install_hooks(dir, &HookSettings::default()).unwrap();
    assert!(matches!(outcome, HookOutcome::Updated(paths) if paths.len() == 2));
}

#[test]
fn hooks_block_push_with_placeholder_commit() {
    let (_remote, local) = remote_and_clone();
    install(local.path());
    let sentinel = local.path().join(".git").join("PUSH_BLOCKED");

    commit(local.path(), "ok.txt", "regular work");
    git(&["push", "-q"], local.path());
    assert!(!sentinel.exists());

    commit(local.path(), "wip.txt", MARKER);
    let output = git_output(&["push", "-q"], local.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains(MARKER));
    assert!(sentinel.exists());

    let target = WatchTarget::discover(local.path()).unwrap().unwrap();
    let watcher = SentinelWatcher::new(vec![target], &WatchConfig::default());
    let events = watcher.poll_once();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, SentinelKind::PushBlocked);
    assert!(!sentinel.exists());
}

#[test]
fn hooks_block_new_branch_push() {
    let (_remote, local) = remote_and_clone();
    install(local.path());

    git(&["checkout", "-q", "-b", "topic"], local.path());
    commit(local.path(), "wip.txt", MARKER);
    let output = git_output(&["push", "-q", "origin", "topic"], local.path());
    assert!(!output.status.success());
    assert!(local.path().join(".git").join("PUSH_BLOCKED").exists());
}

#[test]
fn hooks_flag_pulled_placeholder_commit() {
    let (remote, local) = remote_and_clone();

    let other = tempfile::tempdir().unwrap();
    git(
        &["clone", "-q", remote.path().to_str().unwrap(), "."],
        other.path(),
    );
    configure(other.path());
    commit(other.path(), "wip.txt", MARKER);
    git(&["push", "-q", "--no-verify"], other.path());

    install(local.path());
    git(&["pull", "-q"], local.path());
    assert!(local.path().join(".git").join("PULL_DETECTED").exists());
    assert!(!local.path().join(".git").join("PUSH_BLOCKED").exists());
}

#[test]
fn hooks_uninstall_restores_push() {
    let (_remote, local) = remote_and_clone();
    install(local.path());
    commit(local.path(), "wip.txt", MARKER);
    assert!(!git_output(&["push", "-q"], local.path()).status.success());

    uninstall_hooks(local.path()).unwrap();
    assert!(!local.path().join(".git/hooks/pre-push").exists());
    git(&["push", "-q"], local.path());
}

#[test]
fn hooks_pass_ref_lines_to_existing_pre_push_content() {
    let (_remote, local) = remote_and_clone();
    let hooks = local.path().join(".git").join("hooks");
    fs::create_dir_all(&hooks).unwrap();
    fs::write(
        hooks.join("pre-push"),
        "#!/bin/sh\ncat > \"$(git rev-parse --git-dir)/captured-refs\"\n",
    )
    .unwrap();
    install(local.path());

    commit(local.path(), "ok.txt", "regular work");
    let head = String::from_utf8_lossy(&git_output(&["rev-parse", "HEAD"], local.path()).stdout)
        .trim()
        .to_string();
    git(&["push", "-q"], local.path());

    let captured = fs::read_to_string(local.path().join(".git").join("captured-refs")).unwrap();
    let line = captured.lines().next().unwrap_or_default();
    assert!(line.starts_with("refs/heads/"), "{captured:?}");
    assert!(line.contains(&head), "{captured:?}");
}
