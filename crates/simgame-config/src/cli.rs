//! Command-line options shared by every world tool.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// Global command-line options.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Args, Debug, Default, Clone, PartialEq)]
pub struct CliArgs {
    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Root directory for saved worlds.
    #[arg(long, global = true)]
    pub save_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref dir) = args.save_dir {
            self.storage.user_save_dir = Some(dir.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: CliArgs,
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            save_dir: Some(PathBuf::from("/tmp/worlds")),
            log_level: Some("debug".to_string()),
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.storage.user_save_dir, Some(PathBuf::from("/tmp/worlds")));
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.worldgen.dimension, 256);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let harness =
            Harness::try_parse_from(["simgame", "--save-dir", "/data", "--log-level", "warn"])
                .unwrap();
        assert_eq!(harness.args.save_dir, Some(PathBuf::from("/data")));
        assert_eq!(harness.args.log_level.as_deref(), Some("warn"));
        assert_eq!(harness.args.config, None);
    }
}
