// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Hook command arguments.
//!
//! # Subcommands
//!
//! ```text
//! hooks install    → upsert the marked block into pre-push and post-merge
//! hooks uninstall  → remove the marked blocks, keep foreign content
//! hooks status     → report each hook
//! ```

use clap::{Args, Subcommand};

/// Arguments for the `hooks` command.
#[derive(Debug, Clone, Args)]
pub struct HooksArgs {
    /// Hooks subcommand.
    #[command(subcommand)]
    pub subcommand: HooksSubcommand,
}

/// Hooks subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum HooksSubcommand {
    /// Installs or updates the hook blocks.
    Install,

    /// Removes the hook blocks.
    Uninstall,

    /// Shows whether each hook is installed.
    Status,
}
