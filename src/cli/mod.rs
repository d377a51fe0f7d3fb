// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for dcjs-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! dcjs [global options] <command>
//! hooks {install|uninstall|status}
//! save [--staged]
//! message
//! status
//! watch [--once] [REPO...]
//! split [--yes]
//! history
//! undo [INDEX] [--force]
//! log [--path]
//! ```

pub mod global;
pub mod hooks;
pub mod rewrite;
pub mod watch;


use crate::cli::global::GlobalOptions;
use crate::cli::hooks::HooksArgs;
use crate::cli::rewrite::{SplitArgs, UndoArgs};
use crate::cli::watch::{LogArgs, SaveArgs, WatchArgs};
use clap::{Parser, Subcommand};

/// Don't Commit Just Save
///
/// Keeps "just save" commits from being pushed by accident.
#[derive(Debug, Parser)]
#[command(
    name = "dcjs",
    author,
    version,
    about = "Don't Commit Just Save",
    long_about = "dcjs-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Commit work in progress with a placeholder message, and let the\n\
                  installed git hooks refuse to push it. `dcjs split` moves the\n\
                  placeholder commits out of the unpushed history and leaves their\n\
                  changes staged; `dcjs undo` puts the history back.",
    after_help = "CONFIG FILES:\n\n\
                  dcjs reads `dcjs.toml` from the repository root if present.\n\
                  Additional files can be given with --config and are loaded after\n\
                  it. DCJS_<SECTION>__<KEY> environment variables override both."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Manages the git hooks.
    Hooks(HooksArgs),

    /// Commits with the placeholder message.
    Save(SaveArgs),

    /// Prints the placeholder message.
    Message,

    /// Lists unpushed commits, split into normal and placeholder ones.
    Status,

    /// Watches repositories for blocked pushes and flagged pulls.
    Watch(WatchArgs),

    /// Moves placeholder commits out of the unpushed history.
    Split(SplitArgs),

    /// Lists recorded splits, newest first.
    History,

    /// Restores the history from before a split.
    Undo(UndoArgs),

    /// Shows the operation log.
    Log(LogArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
