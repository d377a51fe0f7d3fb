// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        hooks / watch / split / undo
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '--+--------+--------+------'
//!                 |        |        |
//!                 v        v        v
//!              hooks   sentinel   rewrite
//!             scripts   watcher   split/undo
//!                 |        |        |
//!                 |        +--------+--> notice --> oplog (markdown)
//!                 v                 v
//!   +-----------------------------------------+
//!   |  git   gix queries, git CLI mutations   |
//!   +-----------------------------------------+
//!   |  foundation      error, logging         |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod git;
pub mod hooks;
pub mod logging;
pub mod notice;
pub mod oplog;
pub mod rewrite;
pub mod sentinel;
