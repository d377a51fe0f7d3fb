// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config, hooks, log, rewrite, save, watch
//! ```

pub mod config;
pub mod hooks;
pub mod log;
pub mod rewrite;
pub mod save;
pub mod watch;
