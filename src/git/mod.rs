// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!              Public API
//!   query.rs  cmd.rs  commits.rs  discovery.rs
//!        \      |      /              (fs only)
//!         v     v     v
//!      ,------------------,
//!      | backend (traits) |
//!      '--+----------+----'
//!         |          |
//!         v          v
//!    GitQuery    GitMutation
//!   (gix, read)  (CLI, write)
//!         |          |
//!         v          v
//!    GixBackend  ShellBackend
//!    .branch     .commit / .add_all
//!    .uncommit   .reset_hard
//!    .head       .cherry_pick / .abort
//!    .git_dir    .apply_to_index
//!    .work_tree  .stash_push / .stash_pop
//! ```
//!
//! **`GixBackend`**: pure Rust, no subprocess, read-only.
//! **`ShellBackend`**: git CLI for every history rewrite, so user hooks and
//! config apply exactly as on the command line.

pub mod backend;
pub mod cmd;
pub mod commits;
pub mod discovery;
pub mod query;

#[cfg(test)]
mod tests;
