// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use dcjs_rs::config::Config;
use dcjs_rs::config::types::{DEFAULT_MARKER_MESSAGE, WatchMode};
use dcjs_rs::error::ConfigError;
use dcjs_rs::logging::LogLevel;
use std::path::PathBuf;
use std::time::Duration;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_empty_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.marker(), DEFAULT_MARKER_MESSAGE);
    assert_eq!(config.watch.interval(), Duration::from_millis(100));
    assert_eq!(config.watch.mode, WatchMode::Notify);
    assert!(config.hooks.banner);
    assert!(config.oplog.path.is_none());
}

#[test]
fn config_parse_all_sections() {
    let toml = r#"
[global]
dry = true
output_log_level = 5

[marker]
message = "WIP SAVE"

[watch]
interval_ms = 250
mode = "poll"
install_hooks = false

[hooks]
pull_fallback_depth = 20
banner = false

[oplog]
path = "/tmp/ops.md"
"#;
    let config = Config::parse(toml).unwrap();
    assert!(config.global.dry);
    assert_eq!(config.global.output_log_level, LogLevel::TRACE);
    assert_eq!(config.marker(), "WIP SAVE");
    assert_eq!(config.watch.interval_ms, 250);
    assert_eq!(config.watch.mode, WatchMode::Poll);
    assert!(!config.watch.install_hooks);
    assert_eq!(config.hooks.pull_fallback_depth, 20);
    assert!(!config.hooks.banner);
    assert_eq!(config.oplog.resolved_path(), PathBuf::from("/tmp/ops.md"));
}

#[test]
fn config_format_options() {
    let toml = r#"
[marker]
message = "WIP SAVE"

[watch]
interval_ms = 250
mode = "poll"

[hooks]
banner = false

[oplog]
path = "/tmp/ops.md"
"#;
    let config = Config::parse(toml).unwrap();
    insta::assert_debug_snapshot!(config.format_options(), @r#"
    [
        "global.dry                = false",
        "global.file_log_level     = 4",
        "global.log_file           = ",
        "global.output_log_level   = 3",
        "hooks.banner              = false",
        "hooks.pull_fallback_depth = 5",
        "marker.message            = WIP SAVE",
        "oplog.path                = /tmp/ops.md",
        "watch.install_hooks       = true",
        "watch.interval_ms         = 250",
        "watch.mode                = poll",
    ]
    "#);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn config_unknown_key_rejected() {
    let err = Config::parse("[watch]\nintervall_ms = 5\n").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::ParseError { .. })
    ));
}

#[test]
fn config_marker_with_shell_metacharacters_rejected() {
    let err = Config::parse("[marker]\nmessage = \"costs $5\"\n").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidValue { key, .. }) if key == "message"
    ));
}

#[test]
fn config_zero_interval_rejected() {
    assert!(Config::parse("[watch]\ninterval_ms = 0\n").is_err());
}

#[test]
fn config_bad_log_level_rejected() {
    assert!(Config::parse("[global]\noutput_log_level = 9\n").is_err());
}

// =============================================================================
// Builder Pattern
// =============================================================================

#[test]
fn config_builder_layered() {
    let config = Config::builder()
        .add_toml_str(
            r#"
[marker]
message = "BASE"

[watch]
interval_ms = 500
"#,
        )
        .add_toml_str(
            r#"
[marker]
message = "OVERRIDE"
"#,
        )
        .build()
        .unwrap();

    assert_eq!(config.marker(), "OVERRIDE");
    assert_eq!(config.watch.interval_ms, 500);
}

#[test]
fn config_builder_set_override() {
    let config = Config::builder()
        .add_toml_str("[global]\ndry = false\n")
        .set("global.dry", true)
        .unwrap()
        .set("global.output_log_level", "4")
        .unwrap()
        .build()
        .unwrap();

    assert!(config.global.dry);
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
}

#[test]
fn config_builder_files() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("dcjs.toml");
    std::fs::write(&path, "[marker]\nmessage = \"FROM FILE\"\n").unwrap();

    let loader = Config::builder()
        .add_toml_file_optional(temp.path().join("missing.toml"))
        .add_toml_file(&path);
    assert_eq!(loader.loaded_files().len(), 1);
    assert_eq!(loader.build().unwrap().marker(), "FROM FILE");

    assert!(
        Config::builder()
            .add_toml_file(temp.path().join("missing.toml"))
            .build()
            .is_err()
    );
}
