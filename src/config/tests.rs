// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::types::{DEFAULT_MARKER_MESSAGE, MarkerConfig, WatchMode};
use super::{Config, ConfigLoader};
use crate::logging::LogLevel;
use std::time::Duration;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.marker(), DEFAULT_MARKER_MESSAGE);
    assert_eq!(config.watch.interval(), Duration::from_millis(100));
    assert_eq!(config.watch.mode, WatchMode::Notify);
    assert!(config.watch.install_hooks);
    assert_eq!(config.hooks.pull_fallback_depth, 5);
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert!(config.validate().is_ok());
}

#[test]
fn test_oplog_default_path_in_temp_dir() {
    let config = Config::default();
    let path = config.oplog.resolved_path();
    assert!(path.starts_with(std::env::temp_dir()));
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("dont-commit-just-save.md")
    );
}

#[test]
fn test_marker_validation() {
    let cases = [
        ("DONT COMMIT JUST SAVE", true),
        ("wip: save", true),
        ("", false),
        ("   ", false),
        ("say \"hi\"", false),
        ("$HOME", false),
        ("back`tick", false),
        ("two\nlines", false),
    ];
    for (message, valid) in cases {
        let marker = MarkerConfig {
            message: message.to_string(),
        };
        assert_eq!(marker.validate().is_ok(), valid, "message {message:?}");
    }
}

#[test]
fn test_watch_mode_parse() {
    assert_eq!("poll".parse::<WatchMode>().ok(), Some(WatchMode::Poll));
    assert_eq!("NOTIFY".parse::<WatchMode>().ok(), Some(WatchMode::Notify));
    assert!("inotify".parse::<WatchMode>().is_err());
    assert_eq!(WatchMode::Poll.to_string(), "poll");
}

#[test]
fn test_parse_sections() {
    let config = Config::parse(
        r#"
[marker]
message = "WIP DO NOT PUSH"

[watch]
interval_ms = 250
mode = "poll"

[hooks]
pull_fallback_depth = 10
banner = false
"#,
    )
    .unwrap();

    assert_eq!(config.marker(), "WIP DO NOT PUSH");
    assert_eq!(config.watch.interval_ms, 250);
    assert_eq!(config.watch.mode, WatchMode::Poll);
    assert_eq!(config.hooks.pull_fallback_depth, 10);
    assert!(!config.hooks.banner);
}

#[test]
fn test_unknown_key_rejected() {
    let result = Config::parse("[watch]\ninterval = 5\n");
    assert!(result.is_err());
}

#[test]
fn test_invalid_values_rejected() {
    assert!(Config::parse("[watch]\ninterval_ms = 0\n").is_err());
    assert!(Config::parse("[hooks]\npull_fallback_depth = 0\n").is_err());
    assert!(Config::parse("[marker]\nmessage = \"\"\n").is_err());
    assert!(Config::parse("[global]\noutput_log_level = 9\n").is_err());
}

#[test]
fn test_loader_override_wins() {
    let config = ConfigLoader::new()
        .add_toml_str("[watch]\ninterval_ms = 250\n")
        .set("watch.interval_ms", 500_i64)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.watch.interval_ms, 500);
}

#[test]
fn test_loader_tracks_files() {
    let temp = tempfile::tempdir().unwrap();
    let missing = temp.path().join("dcjs.toml");
    let loader = ConfigLoader::new()
        .add_toml_file_optional(&missing)
        .add_toml_str("");
    assert_eq!(loader.loaded_files().len(), 1);
    insta::assert_debug_snapshot!(loader.format_loaded_files(), @r#"
    [
        "1. [string] <string>",
    ]
    "#);
}

#[test]
fn test_format_options_sorted() {
    let config = Config::default();
    let options = config.format_options();
    let keys: Vec<_> = options
        .iter()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);
    assert!(
        options
            .iter()
            .any(|line| line.starts_with("marker.message") && line.ends_with(DEFAULT_MARKER_MESSAGE))
    );
}
