//! Procedural world generation: seeded tectonics, elevation, hydrology,
//! climate, biome assignment, map overlays, and a binary save format.
//!
//! The consumer API is a handful of synchronous calls:
//!
//! - [`generate`] builds a [`World`] from [`WorldParams`].
//! - [`WorldStore`] saves, loads, lists, and deletes worlds under a save directory.
//! - [`get_overlay`] renders an RGBA view of a world.
//!
//! The same `seed_ascii` always yields a bit-identical world.

mod error;
mod hash;
mod noise;
mod seed;
mod voronoi;

pub mod generator;
pub mod names;
pub mod overlay;
pub mod params;
pub mod persistence;
pub mod world;

pub use error::{WorldError, WorldFormatError};
pub use generator::{GenerationSettings, WorldGenerator, generate};
pub use hash::{FNV_OFFSET_BASIS, FNV_PRIME, fnv1a, fnv1a_str};
pub use self::noise::{NoiseField, NoiseParams};
pub use overlay::{Overlay, OverlayImage, get_overlay, render_overlay};
pub use params::WorldParams;
pub use persistence::{WorldStore, decode_world, encode_world};
pub use seed::{Stream, WorldSeed};
pub use voronoi::{NearestIndex, Voronoi, uniform_points};
pub use world::{
    BiomeType, BoundaryType, Coordinate, Extent, PlateId, Region, RegionId, TectonicPlate, Tile,
    TileId, World, WorldStats,
};
