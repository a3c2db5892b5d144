//! Per-tile terrain and hydrology state.

use super::coords::Coordinate;
use super::region::RegionId;

/// One 1024 m x 1024 m cell of the world grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    /// Owning region; `None` until tectonics assigns one.
    pub region_id: Option<RegionId>,
    /// `true` iff a 4-neighbour belongs to a different region.
    pub is_edge_tile: bool,
    /// Height above the fixed reference, in metres.
    pub absolute_height: f32,
    /// Ocean or lake surface covers this tile.
    pub is_water: bool,
    /// Carries enough flow to count as a river. Never set on water.
    pub is_river: bool,
    /// Water here is a lake rather than ocean.
    pub is_lake: bool,
    /// Water surface height; meaningful only when `is_water`.
    pub water_level: f32,
    /// Water volume passing through this tile.
    pub flow_accumulation: f32,
    /// Lowest downhill neighbour, or the tile itself for sinks.
    pub flow_direction: Coordinate,
}

impl Tile {
    /// A blank tile at `coordinate`, draining to itself.
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            region_id: None,
            is_edge_tile: false,
            absolute_height: 0.0,
            is_water: false,
            is_river: false,
            is_lake: false,
            water_level: 0.0,
            flow_accumulation: 0.0,
            flow_direction: coordinate,
        }
    }

    /// Height water flowing onto this tile settles at.
    #[inline]
    pub fn effective_height(&self) -> f32 {
        if self.is_water {
            self.water_level
        } else {
            self.absolute_height
        }
    }

    /// Ocean water: water that is not a lake.
    #[inline]
    pub fn is_ocean(&self) -> bool {
        self.is_water && !self.is_lake
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tile_drains_to_itself() {
        let c = Coordinate::new(5, 9);
        let tile = Tile::new(c);
        assert_eq!(tile.flow_direction, c);
        assert!(tile.region_id.is_none());
        assert!(!tile.is_water && !tile.is_edge_tile);
    }

    #[test]
    fn test_effective_height_uses_water_level() {
        let mut tile = Tile::new(Coordinate::default());
        tile.absolute_height = 10.0;
        assert_eq!(tile.effective_height(), 10.0);

        tile.is_water = true;
        tile.water_level = 25.0;
        assert_eq!(tile.effective_height(), 25.0);
        assert!(tile.is_ocean());

        tile.is_lake = true;
        assert!(!tile.is_ocean());
    }
}
