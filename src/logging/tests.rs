// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(0).is_ok());
    assert!(LogLevel::new(6).is_ok());
    assert!(LogLevel::new(7).is_err());
    assert_eq!(LogLevel::from_u8(9), None);
    assert_eq!(LogLevel::try_from(4).ok(), Some(LogLevel::DEBUG));
}

#[test]
fn test_filter_directives() {
    let directives: Vec<_> = (0..=6)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::filter_directive)
        .collect();
    insta::assert_debug_snapshot!(directives, @r#"
    [
        "off",
        "error",
        "warn",
        "warn,dcjs_rs=info",
        "warn,dcjs_rs=debug",
        "warn,dcjs_rs=trace",
        "trace",
    ]
    "#);
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert!(config.log_file().is_none());
    assert!(!config.show_target());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::WARN)
        .maybe_with_log_file(Some("dcjs.log".to_string()))
        .build();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.log_file(), Some("dcjs.log"));
}

#[test]
fn test_log_level_serde() {
    let level: LogLevel = serde_json::from_str("5").unwrap();
    assert_eq!(level, LogLevel::TRACE);
    assert!(serde_json::from_str::<LogLevel>("12").is_err());
    assert_eq!(serde_json::to_string(&LogLevel::WARN).unwrap(), "2");
}
