// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for dcjs-rs.

use crate::config::Config;

/// Display current configuration options.
pub fn run_options_command(config: &Config, config_files: &[String]) {
    for line in config.format_options() {
        println!("{line}");
    }
    if !config_files.is_empty() {
        println!();
        println!("Loaded from:");
        for line in config_files {
            println!("  {line}");
        }
    }
}

/// Print the placeholder commit message, e.g. for `git commit -m "$(dcjs message)"`.
pub fn run_message_command(config: &Config) {
    println!("{}", config.marker());
}
