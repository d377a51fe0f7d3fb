// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the history rewrite commands.

use clap::Args;

/// Arguments for the `split` command.
#[derive(Debug, Clone, Default, Args)]
pub struct SplitArgs {
    /// Skips the confirmation prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Hides the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

/// Arguments for the `undo` command.
#[derive(Debug, Clone, Default, Args)]
pub struct UndoArgs {
    /// History entry to restore, 0 being the most recent (see `dcjs history`).
    #[arg(value_name = "INDEX", default_value_t = 0)]
    pub index: usize,

    /// Restores even if the branch moved since the split. Commits made after
    /// the split are discarded.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Skips the confirmation prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Hides the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}
