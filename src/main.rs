// dcjs-rs: Don't Commit Just Save - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Config --> Command Dispatch
//!   Hooks | Save | Status | Watch | Split | History | Undo | Log
//! ```

use std::path::Path;
use std::process::ExitCode;

use dcjs_rs::cli::global::GlobalOptions;
use dcjs_rs::cli::{self, Command};
use dcjs_rs::cmd::config::{run_message_command, run_options_command};
use dcjs_rs::cmd::hooks::run_hooks_command;
use dcjs_rs::cmd::log::run_log_command;
use dcjs_rs::cmd::rewrite::{
    run_history_command, run_split_command, run_status_command, run_undo_command,
};
use dcjs_rs::cmd::save::run_save_command;
use dcjs_rs::cmd::watch::run_watch_command;
use dcjs_rs::config::loader::ConfigLoader;
use dcjs_rs::config::{CONFIG_FILE_NAME, Config, ENV_PREFIX};
use dcjs_rs::git::discovery::find_workspace_root;
use dcjs_rs::logging::init_logging;
use dcjs_rs::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::WARN);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let global = &cli.global;
    let repo = global.repo_dir();
    let dry = global.dry;

    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => load_config(global).map(|config| {
            let loader = build_config_loader(global);
            run_options_command(&config, &loader.format_loaded_files());
        }),
        Some(Command::Hooks(args)) => {
            load_config(global).and_then(|config| run_hooks_command(args, &config, repo, dry))
        }
        Some(Command::Save(args)) => load_config(global)
            .and_then(|config| run_save_command(args, &config, repo, dry))
            .map(|_| ()),
        Some(Command::Message) => load_config(global).map(|config| run_message_command(&config)),
        Some(Command::Status) => {
            load_config(global).and_then(|config| run_status_command(&config, repo))
        }
        Some(Command::Watch(args)) => match load_config(global) {
            Ok(config) => run_watch_command(args, &config, repo, dry).await.map(|_| ()),
            Err(e) => Err(e),
        },
        Some(Command::Split(args)) => {
            load_config(global).and_then(|config| run_split_command(args, &config, repo, dry))
        }
        Some(Command::History) => run_history_command(repo),
        Some(Command::Undo(args)) => {
            load_config(global).and_then(|config| run_undo_command(args, &config, repo, dry))
        }
        Some(Command::Log(args)) => {
            load_config(global).and_then(|config| run_log_command(args, &config))
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

/// `dcjs.toml` from the work tree root, then `--config` files, then env.
fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let repo_config = std::path::absolute(global.repo_dir())
        .ok()
        .and_then(|dir| find_workspace_root(&dir))
        .map_or_else(
            || Path::new(CONFIG_FILE_NAME).to_path_buf(),
            |root| root.join(CONFIG_FILE_NAME),
        );

    let mut loader = ConfigLoader::new().add_toml_file_optional(repo_config);
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

fn load_config(global: &GlobalOptions) -> dcjs_rs::error::Result<Config> {
    let mut loader = build_config_loader(global);
    for (key, value) in global.to_config_overrides() {
        loader = loader.set(key, value)?;
    }
    loader.build().map_err(|e| {
        eprintln!("Failed to load config: {e}");
        e
    })
}
