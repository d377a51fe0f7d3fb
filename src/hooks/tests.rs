// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::script::{post_merge_block, pre_push_block};
use super::{
    HookKind, HookOutcome, HookSettings, HookState, MARKER_END, MARKER_START, hook_status,
    install_hooks, remove_block, uninstall_hooks, upsert_block,
};
use crate::error::HookError;
use std::path::Path;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn fake_repo() -> TempDir {
    let temp = temp_dir();
    std::fs::create_dir(temp.path().join(".git")).unwrap();
    temp
}

fn hook_path(root: &Path, kind: HookKind) -> std::path::PathBuf {
    root.join(".git").join("hooks").join(kind.file_name())
}

#[test]
fn test_upsert_into_missing_file() {
    let content = upsert_block(None, "echo hi").unwrap();
    assert_eq!(
        content,
        format!("#!/bin/sh\n\n{MARKER_START}\necho hi\n{MARKER_END}\n\n")
    );
}

#[test]
fn test_upsert_is_idempotent() {
    let once = upsert_block(Some("#!/bin/sh\necho foreign\n"), "echo hi").unwrap();
    let twice = upsert_block(Some(&once), "echo hi").unwrap();
    assert_eq!(once, twice);
    assert_eq!(once.matches(MARKER_START).count(), 1);
}

#[test]
fn test_upsert_inserts_after_first_line() {
    let content = upsert_block(Some("#!/bin/bash\necho old\n"), "echo hi").unwrap();
    assert_eq!(
        content,
        format!("#!/bin/bash\n\n{MARKER_START}\necho hi\n{MARKER_END}\n\necho old\n")
    );
}

#[test]
fn test_upsert_replaces_existing_block() {
    let old = upsert_block(Some("#!/bin/sh\necho foreign\n"), "echo v1").unwrap();
    let new = upsert_block(Some(&old), "echo v2").unwrap();
    assert!(new.contains("echo v2"));
    assert!(!new.contains("echo v1"));
    assert!(new.ends_with("echo foreign\n"));
}

#[test]
fn test_upsert_adds_missing_shebang() {
    let content = upsert_block(Some("echo foreign\n"), "echo hi").unwrap();
    assert!(content.starts_with("#!/bin/sh\n\n# DONT-COMMIT-JUST-SAVE BEGIN"));
    assert!(content.ends_with("echo foreign\n"));
}

#[test]
fn test_upsert_keeps_crlf() {
    let content = upsert_block(Some("#!/bin/sh\r\necho foreign\r\n"), "a\nb").unwrap();
    assert!(content.contains(&format!("{MARKER_START}\r\na\r\nb\r\n{MARKER_END}\r\n\r\n")));
    assert!(!content.replace("\r\n", "").contains('\n'));
}

#[test]
fn test_remove_block_restores_foreign_content() {
    let original = "#!/bin/sh\necho foreign\n";
    let installed = upsert_block(Some(original), "echo hi").unwrap();
    assert_eq!(remove_block(&installed).unwrap().as_deref(), Some(original));
    assert_eq!(remove_block(original).unwrap(), None);
}

#[test]
fn test_pre_push_block_embeds_message() {
    let settings = HookSettings {
        message: "WIP DO NOT PUSH".to_string(),
        ..HookSettings::default()
    };
    let block = pre_push_block(&settings);
    assert!(block.contains(r#"grep -qF -e "WIP DO NOT PUSH""#));
    assert!(block.contains("PUSH_BLOCKED"));
    assert!(block.contains("@{u}..HEAD"));
    assert!(block.contains("--not --remotes"));
    assert!(block.contains("exit 1"));
    assert!(block.contains("PUSH BLOCKED"));

    let quiet = pre_push_block(&HookSettings {
        banner: false,
        ..HookSettings::default()
    });
    assert!(!quiet.contains("PUSH BLOCKED"));
    assert!(quiet.contains("push blocked: found commit with 'DONT COMMIT JUST SAVE'"));
}

#[test]
fn test_post_merge_block_uses_fallback_depth() {
    let settings = HookSettings {
        pull_fallback_depth: 12,
        ..HookSettings::default()
    };
    let block = post_merge_block(&settings);
    assert!(block.contains("git log ORIG_HEAD..HEAD --pretty=%B"));
    assert!(block.contains("git log -12 --pretty=%B"));
    assert!(block.contains("PULL_DETECTED"));
    assert!(block.contains(r#"grep -qF -e "DONT COMMIT JUST SAVE""#));
    assert!(block.ends_with("dcjs_check_pull || true"));
}

#[test]
fn test_install_creates_both_hooks() {
    let repo = fake_repo();
    let outcome = install_hooks(repo.path(), &HookSettings::default()).unwrap();
    assert_eq!(
        outcome,
        HookOutcome::Updated(vec![
            hook_path(repo.path(), HookKind::PrePush),
            hook_path(repo.path(), HookKind::PostMerge),
        ])
    );

    let pre_push = std::fs::read_to_string(hook_path(repo.path(), HookKind::PrePush)).unwrap();
    assert!(pre_push.starts_with("#!/bin/sh\n"));
    assert!(pre_push.contains("DONT COMMIT JUST SAVE"));
    assert!(pre_push.contains("PUSH_BLOCKED"));

    let post_merge =
        std::fs::read_to_string(hook_path(repo.path(), HookKind::PostMerge)).unwrap();
    assert!(post_merge.contains("PULL_DETECTED"));
    assert!(post_merge.contains("ORIG_HEAD"));
}

#[cfg(unix)]
#[test]
fn test_install_sets_executable_mode() {
    use std::os::unix::fs::PermissionsExt;

    let repo = fake_repo();
    install_hooks(repo.path(), &HookSettings::default()).unwrap();
    for kind in HookKind::ALL {
        let mode = std::fs::metadata(hook_path(repo.path(), kind))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755, "{kind}");
    }
}

#[test]
fn test_install_follows_gitdir_file() {
    let real = temp_dir();
    let worktree = temp_dir();
    std::fs::write(
        worktree.path().join(".git"),
        format!("gitdir: {}\n", real.path().display()),
    )
    .unwrap();

    install_hooks(worktree.path(), &HookSettings::default()).unwrap();
    assert!(real.path().join("hooks").join("pre-push").is_file());
    assert!(!worktree.path().join("hooks").exists());
}

#[test]
fn test_install_rejects_blank_root() {
    let err = install_hooks(Path::new(""), &HookSettings::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<HookError>(),
        Some(HookError::InvalidWorkspace)
    ));
    assert!(install_hooks(Path::new("   "), &HookSettings::default()).is_err());
}

#[test]
fn test_install_skips_non_repository() {
    let temp = temp_dir();
    let outcome = install_hooks(temp.path(), &HookSettings::default()).unwrap();
    assert_eq!(outcome, HookOutcome::NotARepository);
    assert!(!temp.path().join(".git").exists());
    assert_eq!(hook_status(temp.path()).unwrap(), None);
}

#[test]
fn test_uninstall_keeps_foreign_hooks() {
    let repo = fake_repo();
    let hooks = repo.path().join(".git").join("hooks");
    std::fs::create_dir_all(&hooks).unwrap();
    std::fs::write(hooks.join("pre-push"), "#!/bin/sh\necho foreign\n").unwrap();

    install_hooks(repo.path(), &HookSettings::default()).unwrap();
    uninstall_hooks(repo.path()).unwrap();

    assert_eq!(
        std::fs::read_to_string(hooks.join("pre-push")).unwrap(),
        "#!/bin/sh\necho foreign\n"
    );
    assert!(!hooks.join("post-merge").exists());
}

#[test]
fn test_hook_status_transitions() {
    let repo = fake_repo();
    let states = || -> Vec<String> {
        hook_status(repo.path())
            .unwrap()
            .unwrap()
            .into_iter()
            .map(|s| format!("{}: {}", s.kind, s.state))
            .collect()
    };

    insta::assert_debug_snapshot!(states(), @r#"
    [
        "pre-push: not installed",
        "post-merge: not installed",
    ]
    "#);

    install_hooks(repo.path(), &HookSettings::default()).unwrap();
    insta::assert_debug_snapshot!(states(), @r#"
    [
        "pre-push: installed",
        "post-merge: installed",
    ]
    "#);

    uninstall_hooks(repo.path()).unwrap();
    let hooks = repo.path().join(".git").join("hooks");
    std::fs::write(hooks.join("post-merge"), "#!/bin/sh\necho mine\n").unwrap();
    let status = hook_status(repo.path()).unwrap().unwrap();
    assert_eq!(status[0].state, HookState::Missing);
    assert_eq!(status[1].state, HookState::Foreign);
}
