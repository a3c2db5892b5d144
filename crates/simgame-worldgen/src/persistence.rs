//! World persistence: the WSAV binary codec and the on-disk world store.

mod codec;
mod store;

pub use codec::{FORMAT_VERSION, MAGIC, decode_world, encode_world};
pub use store::{WORLD_FILE, WorldStore, validate_name};
