// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `log`: show the markdown operation log.

use crate::cli::watch::LogArgs;
use crate::config::Config;
use crate::error::Result;
use crate::oplog::OpLog;

/// Print the operation log, or its path with `--path`.
///
/// # Errors
///
/// Returns an error if the log exists but cannot be read.
pub fn run_log_command(args: &LogArgs, config: &Config) -> Result<()> {
    let oplog = OpLog::from_config(config);
    if args.path {
        println!("{}", oplog.path().display());
        return Ok(());
    }

    if !oplog.path().exists() {
        println!("No operations logged yet ({})", oplog.path().display());
        return Ok(());
    }
    print!("{}", oplog.read()?);
    Ok(())
}
