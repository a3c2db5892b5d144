//! Configuration for the world tools.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line. Every section tolerates missing and unknown fields, so
//! older and newer config files both load.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE, Config, DebugConfig, StorageConfig, WorldgenConfig};
pub use error::ConfigError;
