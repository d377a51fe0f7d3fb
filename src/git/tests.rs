// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::git::cmd::{add_all, commit};
use crate::git::commits::{
    CommitInfo, commit_patch, merge_base, merge_commit_count, parse_log_records, short_hash,
    unpushed_commits, upstream,
};
use crate::git::discovery::{find_workspace_root, hooks_dir, parse_gitdir_pointer, resolve_git_dir};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn git(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialize a repository with one commit and return its hash.
fn init_test_repo_with_commit(path: &Path) -> String {
    git(path, &["init", "--quiet"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test"]);
    std::fs::write(path.join("file.txt"), "base\n").unwrap();
    add_all(path).unwrap();
    commit(path, "base").unwrap();
    git(path, &["rev-parse", "HEAD"])
}

fn commit_file(path: &Path, name: &str, content: &str, message: &str) -> String {
    std::fs::write(path.join(name), content).unwrap();
    add_all(path).unwrap();
    commit(path, message).unwrap();
    git(path, &["rev-parse", "HEAD"])
}

#[test]
fn test_parse_log_records() {
    let raw = "aaa\x1ffirst line\n\nbody\n\x1e\nbbb\x1fDONT COMMIT JUST SAVE\n\x1e\n";
    let commits = parse_log_records(raw);
    assert_eq!(
        commits,
        vec![
            CommitInfo {
                hash: "aaa".to_string(),
                message: "first line\n\nbody".to_string(),
            },
            CommitInfo {
                hash: "bbb".to_string(),
                message: "DONT COMMIT JUST SAVE".to_string(),
            },
        ]
    );
    assert!(parse_log_records("").is_empty());
    assert!(parse_log_records("\n").is_empty());
}

#[test]
fn test_commit_info_display_helpers() {
    let info = CommitInfo {
        hash: "0123456789abcdef".to_string(),
        message: "subject\n\nbody".to_string(),
    };
    assert_eq!(info.subject(), "subject");
    assert_eq!(info.short_hash(), "01234567");

    let short = CommitInfo {
        hash: "abc".to_string(),
        message: String::new(),
    };
    assert_eq!(short.short_hash(), "abc");
    assert_eq!(short.subject(), "");
    assert_eq!(short_hash(&"f".repeat(40)), "ffffffff");
    assert_eq!(short_hash(""), "");
}

#[test]
fn test_unpushed_commits_oldest_first() {
    let temp = temp_dir();
    let base = init_test_repo_with_commit(temp.path());
    let first = commit_file(temp.path(), "a.txt", "a\n", "feature a");
    let second = commit_file(temp.path(), "b.txt", "b\n", "DONT COMMIT JUST SAVE");

    let commits = unpushed_commits(temp.path(), &base).unwrap();
    let hashes: Vec<_> = commits.iter().map(|c| c.hash.as_str()).collect();
    assert_eq!(hashes, [first.as_str(), second.as_str()]);
    assert_eq!(commits[1].message, "DONT COMMIT JUST SAVE");

    assert!(unpushed_commits(temp.path(), &second).unwrap().is_empty());
}

#[test]
fn test_upstream_and_merge_base() {
    let remote = temp_dir();
    git(remote.path(), &["init", "--bare", "--quiet"]);

    let temp = temp_dir();
    let base = init_test_repo_with_commit(temp.path());
    assert_eq!(upstream(temp.path()).unwrap(), None);

    let remote_url = remote.path().to_str().unwrap();
    git(temp.path(), &["remote", "add", "origin", remote_url]);
    git(temp.path(), &["push", "--quiet", "-u", "origin", "HEAD"]);
    let tracked = upstream(temp.path()).unwrap().expect("upstream configured");
    assert!(tracked.starts_with("origin/"));

    commit_file(temp.path(), "a.txt", "a\n", "local only");
    assert_eq!(merge_base(temp.path(), "HEAD", "@{u}").unwrap(), base);
    assert_eq!(git(temp.path(), &["rev-parse", "@{u}"]), base);
}

#[test]
fn test_merge_commit_count() {
    let temp = temp_dir();
    let base = init_test_repo_with_commit(temp.path());
    let main = git(temp.path(), &["branch", "--show-current"]);

    git(temp.path(), &["checkout", "--quiet", "-b", "side"]);
    commit_file(temp.path(), "side.txt", "side\n", "side work");
    git(temp.path(), &["checkout", "--quiet", &main]);
    commit_file(temp.path(), "main.txt", "main\n", "main work");
    assert_eq!(merge_commit_count(temp.path(), &base).unwrap(), 0);

    git(temp.path(), &["merge", "--quiet", "--no-edit", "side"]);
    assert_eq!(merge_commit_count(temp.path(), &base).unwrap(), 1);
}

#[test]
fn test_commit_patch_contains_change() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());
    let hash = commit_file(temp.path(), "file.txt", "changed\n", "edit");

    let patch = String::from_utf8(commit_patch(temp.path(), &hash).unwrap()).unwrap();
    assert!(patch.contains("diff --git a/file.txt b/file.txt"));
    assert!(patch.contains("-base"));
    assert!(patch.contains("+changed"));
}

#[test]
fn test_resolve_git_dir_variants() {
    let temp = temp_dir();
    assert_eq!(resolve_git_dir(temp.path()).unwrap(), None);

    // .git directory
    std::fs::create_dir(temp.path().join(".git")).unwrap();
    assert_eq!(
        resolve_git_dir(temp.path()).unwrap(),
        Some(temp.path().join(".git"))
    );

    // .git file with relative pointer
    let worktree = temp_dir();
    std::fs::write(
        worktree.path().join(".git"),
        "gitdir: ../main/.git/worktrees/wt\n",
    )
    .unwrap();
    assert_eq!(
        resolve_git_dir(worktree.path()).unwrap(),
        Some(worktree.path().join("../main/.git/worktrees/wt"))
    );

    // .git file without pointer
    let broken = temp_dir();
    std::fs::write(broken.path().join(".git"), "garbage\n").unwrap();
    assert_eq!(resolve_git_dir(broken.path()).unwrap(), None);
}

#[test]
fn test_parse_gitdir_pointer() {
    let cases = [
        ("gitdir: /abs/path\n", Some("/abs/path")),
        ("  gitdir:   rel/path   \r\n", Some("rel/path")),
        ("other: x\ngitdir: second\n", Some("second")),
        ("gitdir:\n", None),
        ("", None),
    ];
    for (content, expected) in cases {
        assert_eq!(
            parse_gitdir_pointer(content).unwrap().as_deref(),
            expected,
            "content {content:?}"
        );
    }
}

#[test]
fn test_hooks_dir_follows_commondir() {
    let temp = temp_dir();
    let git_dir = temp.path().join(".git");
    std::fs::create_dir(&git_dir).unwrap();
    assert_eq!(hooks_dir(&git_dir).unwrap(), git_dir.join("hooks"));

    let linked = git_dir.join("worktrees").join("wt");
    std::fs::create_dir_all(&linked).unwrap();
    std::fs::write(linked.join("commondir"), "../..\n").unwrap();
    assert_eq!(
        hooks_dir(&linked).unwrap(),
        linked.join("../..").join("hooks")
    );
}

#[test]
fn test_find_workspace_root_walks_up() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());
    let nested = temp.path().join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();

    assert_eq!(find_workspace_root(&nested), Some(temp.path().to_path_buf()));
}
