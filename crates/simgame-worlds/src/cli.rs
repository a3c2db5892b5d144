//! Command-line interface: global options plus one subcommand per operation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use simgame_config::CliArgs;
use simgame_worldgen::Overlay;

/// Generate, inspect, and manage saved worlds.
#[derive(Parser, Debug)]
#[command(name = "simgame-worlds", about = "Procedural world generator")]
pub struct Cli {
    #[command(flatten)]
    pub global: CliArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Generate a new world and save it.
    Generate(GenerateArgs),
    /// List saved worlds.
    List,
    /// Delete a saved world and everything in its directory.
    Delete {
        /// World name.
        name: String,
    },
    /// Render an overlay of a saved world to a PNG file.
    Overlay {
        /// World name.
        name: String,
        /// One of: plates, height, water, biome.
        #[arg(value_parser = parse_overlay)]
        kind: Overlay,
        /// Output PNG path.
        out: PathBuf,
    },
}

/// Parameters for `generate`. Unset values come from the config.
#[derive(clap::Args, Debug, Default, PartialEq)]
pub struct GenerateArgs {
    /// World name (random when omitted and not configured).
    #[arg(long)]
    pub name: Option<String>,
    /// Seed text (random word when omitted and not configured).
    #[arg(long)]
    pub seed: Option<String>,
    /// Edge length in tiles: 64, 128, 256, or 512.
    #[arg(long)]
    pub dimension: Option<u32>,
    /// Continental plates: 2, 4, 8, or 16.
    #[arg(long)]
    pub continents: Option<u32>,
    /// Land percentage: 30, 40, 50, 60, or 70.
    #[arg(long)]
    pub land: Option<f32>,
    /// Tiles per region: 4, 8, 16, 32, 64, or 128.
    #[arg(long)]
    pub region_size: Option<u32>,
    /// Also write every overlay as `<name>-<kind>.png` into this directory.
    #[arg(long)]
    pub overlays: Option<PathBuf>,
}

fn parse_overlay(s: &str) -> Result<Overlay, String> {
    Overlay::from_name(s).ok_or_else(|| {
        let names: Vec<_> = Overlay::ALL.iter().map(|o| o.name()).collect();
        format!("unknown overlay {s:?}, expected one of {}", names.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "simgame-worlds",
            "generate",
            "--name",
            "Atlas",
            "--dimension",
            "128",
            "--land",
            "60",
            "--save-dir",
            "/tmp/worlds",
        ])
        .unwrap();
        assert_eq!(cli.global.save_dir, Some(PathBuf::from("/tmp/worlds")));
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.name.as_deref(), Some("Atlas"));
        assert_eq!(args.dimension, Some(128));
        assert_eq!(args.land, Some(60.0));
        assert_eq!(args.seed, None);
    }

    #[test]
    fn test_parse_overlay() {
        let cli =
            Cli::try_parse_from(["simgame-worlds", "overlay", "Atlas", "water", "out.png"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Overlay {
                name: "Atlas".into(),
                kind: Overlay::WaterMap,
                out: PathBuf::from("out.png"),
            }
        );
        assert!(Cli::try_parse_from(["simgame-worlds", "overlay", "Atlas", "rain", "o.png"]).is_err());
    }

    #[test]
    fn test_global_flags_before_subcommand() {
        let cli =
            Cli::try_parse_from(["simgame-worlds", "--log-level", "debug", "list"]).unwrap();
        assert_eq!(cli.global.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.command, Command::List);
    }
}
