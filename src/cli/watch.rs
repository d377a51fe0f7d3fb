// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the everyday commands: save, watch and log.

use crate::config::types::WatchMode;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Arguments for the `save` command.
#[derive(Debug, Clone, Default, Args)]
pub struct SaveArgs {
    /// Commits only what is already staged instead of every change.
    #[arg(short = 's', long)]
    pub staged: bool,
}

/// Arguments for the `watch` command.
#[derive(Debug, Clone, Default, Args)]
pub struct WatchArgs {
    /// Checks once and exits instead of watching.
    #[arg(long)]
    pub once: bool,

    /// Overrides `watch.mode`.
    #[arg(long, value_enum, value_name = "MODE")]
    pub mode: Option<WatchModeArg>,

    /// Repositories to watch. Defaults to the global --repo.
    #[arg(value_name = "REPO")]
    pub repos: Vec<PathBuf>,
}

/// CLI spelling of [`WatchMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WatchModeArg {
    /// Fixed-interval polling only.
    Poll,
    /// Filesystem notifications plus polling.
    Notify,
}

impl From<WatchModeArg> for WatchMode {
    fn from(arg: WatchModeArg) -> Self {
        match arg {
            WatchModeArg::Poll => Self::Poll,
            WatchModeArg::Notify => Self::Notify,
        }
    }
}

/// Arguments for the `log` command.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Prints the log file location instead of its content.
    #[arg(long)]
    pub path: bool,
}
