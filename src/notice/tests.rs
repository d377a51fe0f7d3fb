// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Notice, NoticeLevel, confirm, confirm_with};
use crate::oplog::{EntryKind, OpLog};
use std::io::Cursor;

#[test]
fn test_info_maps_to_success() {
    assert_eq!(NoticeLevel::Info.entry_kind(), EntryKind::Success);
    assert_eq!(NoticeLevel::Warning.entry_kind(), EntryKind::Warning);
    assert_eq!(NoticeLevel::Error.entry_kind(), EntryKind::Error);
}

#[test]
fn test_render_with_details() {
    let notice = Notice::error("Push blocked: Found commit with 'DONT COMMIT JUST SAVE' message")
        .with_details("Please remove or amend the commit before pushing.");
    insta::assert_snapshot!(notice.render(), @r"
    error: Push blocked: Found commit with 'DONT COMMIT JUST SAVE' message
      Please remove or amend the commit before pushing.
    ");
}

#[test]
fn test_emit_writes_oplog() {
    let temp = tempfile::tempdir().unwrap();
    let oplog = OpLog::new(temp.path().join("log.md"));

    Notice::info("Reset completed").emit(&oplog);
    Notice::warning("Pull detected")
        .with_details("first\nsecond")
        .emit(&oplog);

    let content = oplog.read().unwrap();
    assert!(content.contains("✅ SUCCESS - Reset completed - "));
    assert!(content.contains("WARNING - Pull detected - "));
    assert!(content.contains("   > first\n   > second\n"));
}

#[test]
fn test_confirm_answers() {
    let cases = [
        ("y\n", true),
        ("YES\n", true),
        ("proceed\n", true),
        ("n\n", false),
        ("\n", false),
        ("", false),
    ];
    for (answer, expected) in cases {
        let mut output = Vec::new();
        let accepted = confirm_with("Proceed?", &mut Cursor::new(answer), &mut output).unwrap();
        assert_eq!(accepted, expected, "answer {answer:?}");
        assert_eq!(String::from_utf8(output).unwrap(), "Proceed? [y/N] ");
    }
}

#[test]
fn test_confirm_assume_yes_skips_prompt() {
    assert!(confirm("Proceed?", true).unwrap());
}
