//! Regions: Voronoi cells that group tiles sharing ownership and biome.

use std::collections::BTreeSet;

use glam::Vec2;

use super::biome::BiomeType;
use super::plate::PlateId;

/// Index into the world's region list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u32);

impl RegionId {
    /// The id as a vector index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A Voronoi cell over region centroids.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Region {
    /// Seed point of the cell, in world units.
    pub centroid: Vec2,
    /// Regions sharing a border with this one. Symmetric, never contains self.
    pub neighbors: BTreeSet<RegionId>,
    /// Owning plate.
    pub plate_id: Option<PlateId>,

    /// Some neighbour lies on a different plate.
    pub is_boundary: bool,
    /// An oceanic plate dives under a continental neighbour here.
    pub has_subduction: bool,
    /// Contains ocean tiles.
    pub is_ocean: bool,
    /// Ocean or lake.
    pub is_water: bool,
    /// Contains lake tiles and no ocean.
    pub is_lake: bool,
    /// Raised by convergent uplift.
    pub is_mountain: bool,
    /// Contains river tiles.
    pub has_river: bool,
    /// Land region bordering an ocean region.
    pub is_coastal: bool,
    /// Wet land without a draining river.
    pub is_swamp: bool,
    /// Cold enough for ice.
    pub is_frozen: bool,

    /// Mean height in metres.
    pub absolute_height: f32,
    /// Highest water surface among the region's tiles, 0 when dry.
    pub water_level: f32,
    /// Largest tile flow accumulation.
    pub flow_accumulation: f32,
    /// Centroid y over world height, in `[0, 1]`.
    pub latitude: f32,
    /// Mean temperature in degrees Celsius.
    pub temperature: f32,
    /// Seasonal swing in degrees Celsius.
    pub temperature_variance: f32,
    /// Relative moisture, 30..=100.
    pub moisture: f32,

    /// Region that receives this region's main outflow.
    pub flow_direction: Option<RegionId>,
    /// Assigned by the climate pass.
    pub biome: Option<BiomeType>,
}

impl Region {
    /// A region seeded at `centroid` with no neighbours yet.
    pub fn new(centroid: Vec2) -> Self {
        Self {
            centroid,
            ..Default::default()
        }
    }
}
