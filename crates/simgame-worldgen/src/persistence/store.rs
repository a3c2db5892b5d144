//! Named worlds on disk under `<user_save_dir>/worlds/<name>/world.bin`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::codec::{decode_world, encode_world};
use crate::error::WorldError;
use crate::world::World;

/// File holding the encoded world inside its directory.
pub const WORLD_FILE: &str = "world.bin";

const WORLDS_DIR: &str = "worlds";
const TEMP_SUFFIX: &str = ".tmp";

/// Saves, loads, lists, and deletes worlds below one save directory.
#[derive(Clone, Debug)]
pub struct WorldStore {
    user_save_dir: PathBuf,
}

impl WorldStore {
    /// A store rooted at `user_save_dir`. Nothing is touched until first use.
    pub fn new(user_save_dir: impl Into<PathBuf>) -> Self {
        Self {
            user_save_dir: user_save_dir.into(),
        }
    }

    /// The root save directory.
    pub fn user_save_dir(&self) -> &Path {
        &self.user_save_dir
    }

    /// Directory holding one subdirectory per world.
    pub fn worlds_dir(&self) -> PathBuf {
        self.user_save_dir.join(WORLDS_DIR)
    }

    /// Directory of the world called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] if `name` is not a valid world name.
    pub fn world_dir(&self, name: &str) -> Result<PathBuf, WorldError> {
        validate_name(name)?;
        Ok(self.worlds_dir().join(name))
    }

    /// Write `world` to `<worlds>/<world.name>/world.bin`.
    ///
    /// The file is written next to its destination and renamed into place,
    /// so a failed save never leaves a half-written `world.bin`. Other files
    /// in the world directory are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] for a bad world name and
    /// [`WorldError::Io`] when the directory or file cannot be written.
    pub fn save(&self, world: &World) -> Result<PathBuf, WorldError> {
        let dir = self.world_dir(world.name())?;
        fs::create_dir_all(&dir).map_err(|e| WorldError::io(&dir, e))?;

        let path = dir.join(WORLD_FILE);
        let temp = dir.join(format!("{WORLD_FILE}{TEMP_SUFFIX}"));
        let bytes = encode_world(world);
        fs::write(&temp, &bytes).map_err(|e| WorldError::io(&temp, e))?;
        if let Err(e) = fs::rename(&temp, &path) {
            let _ = fs::remove_file(&temp);
            return Err(WorldError::io(&path, e));
        }

        tracing::info!(name = world.name(), path = %path.display(), bytes = bytes.len(), "Saved world");
        Ok(path)
    }

    /// Read the world called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NotFound`] if no such world is saved,
    /// [`WorldError::Io`] if the file cannot be read, and
    /// [`WorldError::Format`] if its contents are malformed.
    pub fn load(&self, name: &str) -> Result<World, WorldError> {
        let path = self.world_dir(name)?.join(WORLD_FILE);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(WorldError::NotFound(name.to_string()));
            }
            Err(e) => return Err(WorldError::io(&path, e)),
        };
        let world = decode_world(&bytes)?;
        tracing::info!(name, path = %path.display(), "Loaded world");
        Ok(world)
    }

    /// Names of all saved worlds, sorted. A missing save directory is empty.
    ///
    /// Only directories containing a `world.bin` count.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Io`] if the worlds directory cannot be read.
    pub fn list(&self) -> Result<Vec<String>, WorldError> {
        let dir = self.worlds_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(WorldError::io(&dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| WorldError::io(&dir, e))?;
            let path = entry.path();
            if !path.join(WORLD_FILE).is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str()
                && validate_name(name).is_ok()
            {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Remove the world called `name` and everything in its directory.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NotFound`] if no such world exists and
    /// [`WorldError::Io`] if removal fails.
    pub fn delete(&self, name: &str) -> Result<(), WorldError> {
        let dir = self.world_dir(name)?;
        match fs::remove_dir_all(&dir) {
            Ok(()) => {
                tracing::info!(name, path = %dir.display(), "Deleted world");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(WorldError::NotFound(name.to_string())),
            Err(e) => Err(WorldError::io(&dir, e)),
        }
    }
}

/// World names map one-to-one to directory names.
///
/// # Errors
///
/// Returns [`WorldError::InvalidArgument`] for empty names, names containing
/// a path separator or `..`, and names that are only `.`.
pub fn validate_name(name: &str) -> Result<(), WorldError> {
    let invalid = name.is_empty()
        || name == "."
        || name.contains("..")
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(WorldError::InvalidArgument(format!("invalid world name {name:?}")));
    }
    Ok(())
}
