//! Errors surfaced by the command-line front end.

use std::path::PathBuf;

/// Anything a subcommand can fail with.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Generation, storage, or decoding failed.
    #[error(transparent)]
    World(#[from] simgame_worldgen::WorldError),

    /// The config file could not be loaded.
    #[error(transparent)]
    Config(#[from] simgame_config::ConfigError),

    /// An overlay could not be written as PNG.
    #[error("failed to write {}: {source}", path.display())]
    Png {
        /// Destination file.
        path: PathBuf,
        /// Underlying encoder error.
        #[source]
        source: png::EncodingError,
    },

    /// The overlay output file or directory could not be created.
    #[error("failed to create {}: {source}", path.display())]
    Io {
        /// Path that could not be created.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}
