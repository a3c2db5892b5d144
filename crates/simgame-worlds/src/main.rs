//! Command-line front end for generating and managing saved worlds.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p simgame-worlds -- generate --dimension 128` to create a world.

mod cli;
mod commands;
mod error;
mod export;

use std::process::ExitCode;

use clap::Parser;
use simgame_config::Config;
use simgame_worldgen::WorldStore;

use crate::cli::{Cli, Command};
use crate::error::AppError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Resolve config directory
    let config_dir = cli.global.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("simgame")
    });

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&cli.global);

    let log_dir = config_dir.join("logs");
    simgame_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &Config) -> Result<(), AppError> {
    let store = WorldStore::new(config.storage.resolved_save_dir());
    tracing::debug!(save_dir = %store.user_save_dir().display(), "Using save directory");

    match command {
        Command::Generate(args) => {
            let params = commands::resolve_params(&args, &config.worldgen);
            commands::generate_world(&store, params, args.overlays.as_deref())?;
        }
        Command::List => {
            commands::list_worlds(&store)?;
        }
        Command::Delete { name } => commands::delete_world(&store, &name)?,
        Command::Overlay { name, kind, out } => {
            commands::export_overlay(&store, &name, kind, &out)?;
        }
    }
    Ok(())
}
