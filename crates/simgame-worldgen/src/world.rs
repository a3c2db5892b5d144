//! The world data model: plates own regions, regions own tiles.
//!
//! [`World`] exclusively owns the plate, region, and tile vectors. Everything
//! cross-references by integer id, so a world can be cloned, compared, and
//! persisted without pointer fix-up.

mod biome;
mod coords;
mod plate;
mod region;
mod tile;

pub use biome::BiomeType;
pub use coords::{Coordinate, Extent, TILE_SIZE_METERS, TileId};
pub use plate::{BoundaryType, PlateId, TectonicPlate};
pub use region::{Region, RegionId};
pub use tile::Tile;

use glam::Vec2;

use crate::error::WorldError;
use crate::params::WorldParams;
use crate::voronoi::NearestIndex;

/// A generated (or generating) planet.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    params: WorldParams,
    extent: Extent,
    tiles: Vec<Tile>,
    regions: Vec<Region>,
    plates: Vec<TectonicPlate>,
    ocean_level: f32,
}

/// Summary counts over a world's tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldStats {
    /// Tiles at or above the ocean level.
    pub land_tiles: usize,
    /// Ocean tiles.
    pub ocean_tiles: usize,
    /// Lake tiles.
    pub lake_tiles: usize,
    /// River tiles.
    pub river_tiles: usize,
    /// `land_tiles / total`.
    pub land_fraction: f32,
}

impl World {
    /// Allocate an empty world: `dimension^2` blank tiles, no regions or plates.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] if `params` fails validation.
    pub fn new(params: WorldParams) -> Result<Self, WorldError> {
        params.validate()?;
        let extent = Extent::square(params.dimension);
        let tiles = (0..extent.area() as u32)
            .filter_map(|i| extent.coordinate(TileId(i)))
            .map(Tile::new)
            .collect();
        Ok(Self {
            params,
            extent,
            tiles,
            regions: Vec::new(),
            plates: Vec::new(),
            ocean_level: 0.0,
        })
    }

    /// Generation inputs.
    pub fn params(&self) -> &WorldParams {
        &self.params
    }

    /// World name (from the parameters).
    pub fn name(&self) -> &str {
        &self.params.name
    }

    /// Grid size in tiles.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Height below which tiles are ocean.
    pub fn ocean_level(&self) -> f32 {
        self.ocean_level
    }

    pub(crate) fn set_ocean_level(&mut self, level: f32) {
        self.ocean_level = level;
    }

    // --- Coordinate conversions ---

    /// Row-major id of `c`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] when `c` is off the grid.
    pub fn coordinate_to_tile_id(&self, c: Coordinate) -> Result<TileId, WorldError> {
        self.extent
            .tile_id(c)
            .ok_or_else(|| WorldError::InvalidArgument(format!("coordinate {c:?} off the grid")))
    }

    /// Coordinate of tile `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] when `id` is out of range.
    pub fn tile_id_to_coordinate(&self, id: TileId) -> Result<Coordinate, WorldError> {
        self.extent
            .coordinate(id)
            .ok_or_else(|| WorldError::InvalidArgument(format!("tile id {} out of range", id.0)))
    }

    /// World-space centre of tile `c`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] when `c` is off the grid.
    pub fn coordinate_to_position(&self, c: Coordinate) -> Result<Vec2, WorldError> {
        self.coordinate_to_tile_id(c)?;
        Ok(self.extent.position(c))
    }

    /// Tile containing world position `p`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] when `p` is outside the world.
    pub fn position_to_coordinate(&self, p: Vec2) -> Result<Coordinate, WorldError> {
        self.extent
            .coordinate_at(p)
            .ok_or_else(|| WorldError::InvalidArgument(format!("position {p} outside the world")))
    }

    // --- Accessors ---

    /// All tiles in id order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// All regions in id order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// All plates in id order.
    pub fn plates(&self) -> &[TectonicPlate] {
        &self.plates
    }

    /// Tile `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] when `id` is out of range.
    pub fn tile(&self, id: TileId) -> Result<&Tile, WorldError> {
        self.tiles
            .get(id.index())
            .ok_or_else(|| WorldError::InvalidArgument(format!("tile id {} out of range", id.0)))
    }

    /// Tile at coordinate `c`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] when `c` is off the grid.
    pub fn tile_at(&self, c: Coordinate) -> Result<&Tile, WorldError> {
        let id = self.coordinate_to_tile_id(c)?;
        Ok(&self.tiles[id.index()])
    }

    /// Region `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] when `id` is out of range.
    pub fn region(&self, id: RegionId) -> Result<&Region, WorldError> {
        self.regions
            .get(id.index())
            .ok_or_else(|| WorldError::InvalidArgument(format!("region id {} out of range", id.0)))
    }

    /// Plate `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] when `id` is out of range.
    pub fn plate(&self, id: PlateId) -> Result<&TectonicPlate, WorldError> {
        self.plates
            .get(id.index())
            .ok_or_else(|| WorldError::InvalidArgument(format!("plate id {} out of range", id.0)))
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub(crate) fn regions_mut(&mut self) -> &mut [Region] {
        &mut self.regions
    }

    pub(crate) fn plates_mut(&mut self) -> &mut [TectonicPlate] {
        &mut self.plates
    }

    /// Vector index of an on-grid coordinate.
    #[inline]
    pub(crate) fn index_of(&self, c: Coordinate) -> usize {
        c.y as usize * self.extent.width as usize + c.x as usize
    }

    // --- Installation ---

    /// Replace the plate list.
    pub fn set_plates(&mut self, plates: Vec<TectonicPlate>) {
        self.plates = plates;
    }

    /// Replace the region list.
    ///
    /// With `update_tiles`, every tile is reassigned to the region whose
    /// centroid is nearest its centre (lowest id on ties) and edge flags are
    /// recomputed. Without it, tiles keep their current assignment; the
    /// loader relies on that.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] when `update_tiles` is set and
    /// `regions` is empty.
    pub fn set_regions(&mut self, regions: Vec<Region>, update_tiles: bool) -> Result<(), WorldError> {
        if update_tiles {
            let centroids = regions.iter().map(|r| r.centroid).collect();
            let index = NearestIndex::new(centroids, self.extent.world_size())?;
            let extent = self.extent;
            for (i, tile) in self.tiles.iter_mut().enumerate() {
                if let Some(c) = extent.coordinate(TileId(i as u32)) {
                    tile.region_id = Some(RegionId(index.nearest(extent.position(c))));
                }
            }
        }
        self.regions = regions;
        if update_tiles {
            self.update_edge_tiles();
        }
        Ok(())
    }

    /// Recompute `is_edge_tile` from east and south neighbours, marking both sides.
    pub fn update_edge_tiles(&mut self) {
        let width = self.extent.width as usize;
        let height = self.extent.height as usize;
        for tile in &mut self.tiles {
            tile.is_edge_tile = false;
        }
        for y in 0..height {
            for x in 0..width {
                let i = y * width + x;
                let mut check = |j: usize| {
                    if self.tiles[i].region_id != self.tiles[j].region_id {
                        self.tiles[i].is_edge_tile = true;
                        self.tiles[j].is_edge_tile = true;
                    }
                };
                if x + 1 < width {
                    check(i + 1);
                }
                if y + 1 < height {
                    check(i + width);
                }
            }
        }
    }

    // --- Derived queries ---

    /// Strongest plate boundary touching region `id`, with the plate across it.
    ///
    /// Returns `(BoundaryType::None, None)` for interior regions.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] when `id` is out of range.
    pub fn region_boundary(
        &self,
        id: RegionId,
    ) -> Result<(BoundaryType, Option<PlateId>), WorldError> {
        let region = self.region(id)?;
        let Some(plate_id) = region.plate_id else {
            return Ok((BoundaryType::None, None));
        };
        let plate = self.plate(plate_id)?;

        let mut best = (BoundaryType::None, None);
        for neighbor in &region.neighbors {
            let Some(other) = self.regions.get(neighbor.index()).and_then(|r| r.plate_id) else {
                continue;
            };
            if other == plate_id {
                continue;
            }
            let kind = plate.boundary_with(other);
            if kind > best.0 {
                best = (kind, Some(other));
            }
        }
        Ok(best)
    }

    /// Counts of land and water tiles.
    pub fn stats(&self) -> WorldStats {
        let mut stats = WorldStats::default();
        for tile in &self.tiles {
            if tile.absolute_height >= self.ocean_level {
                stats.land_tiles += 1;
            }
            if tile.is_ocean() {
                stats.ocean_tiles += 1;
            }
            if tile.is_lake {
                stats.lake_tiles += 1;
            }
            if tile.is_river {
                stats.river_tiles += 1;
            }
        }
        if !self.tiles.is_empty() {
            stats.land_fraction = stats.land_tiles as f32 / self.tiles.len() as f32;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn small_world() -> World {
        World::new(WorldParams {
            dimension: 64,
            num_continents: 2,
            percent_land: 50.0,
            region_size: 16,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_new_allocates_identity_tiles() {
        let world = small_world();
        assert_eq!(world.tiles().len(), 64 * 64);
        for (i, tile) in world.tiles().iter().enumerate() {
            let c = world.tile_id_to_coordinate(TileId(i as u32)).unwrap();
            assert_eq!(tile.flow_direction, c);
        }
    }

    #[test]
    fn test_new_rejects_invalid_params() {
        let result = World::new(WorldParams {
            dimension: 65,
            ..Default::default()
        });
        assert!(matches!(result, Err(WorldError::InvalidArgument(_))));
    }

    #[test]
    fn test_conversions_are_inverse() {
        let world = small_world();
        for y in (0..64).step_by(7) {
            for x in (0..64).step_by(5) {
                let c = Coordinate::new(x, y);
                let id = world.coordinate_to_tile_id(c).unwrap();
                assert_eq!(world.tile_id_to_coordinate(id).unwrap(), c);
                let p = world.coordinate_to_position(c).unwrap();
                assert_eq!(world.position_to_coordinate(p).unwrap(), c);
            }
        }
        assert!(world.tile(TileId(64 * 64)).is_err());
        assert!(world.coordinate_to_position(Coordinate::new(64, 0)).is_err());
    }

    #[test]
    fn test_set_regions_assigns_nearest_and_marks_edges() {
        let mut world = small_world();
        let size = world.extent().world_size();
        let regions = vec![
            Region::new(Vec2::new(size.x * 0.25, size.y * 0.5)),
            Region::new(Vec2::new(size.x * 0.75, size.y * 0.5)),
        ];
        world.set_regions(regions, true).unwrap();

        for y in 0..64 {
            for x in 0..64 {
                let tile = world.tile_at(Coordinate::new(x, y)).unwrap();
                let expected = if x < 32 { 0 } else { 1 };
                assert_eq!(tile.region_id, Some(RegionId(expected)));
                assert_eq!(tile.is_edge_tile, x == 31 || x == 32, "edge flag at ({x},{y})");
            }
        }
    }

    #[test]
    fn test_set_regions_without_update_keeps_tiles() {
        let mut world = small_world();
        world.set_regions(vec![Region::new(Vec2::ZERO)], false).unwrap();
        assert!(world.tiles().iter().all(|t| t.region_id.is_none()));
    }

    #[test]
    fn test_set_regions_empty_with_update_rejected() {
        let mut world = small_world();
        let result = world.set_regions(Vec::new(), true);
        assert!(matches!(result, Err(WorldError::InvalidArgument(_))));
    }

    #[test]
    fn test_region_boundary_picks_strongest() {
        let mut world = small_world();
        let mut plate_a = TectonicPlate::default();
        plate_a.boundaries = BTreeMap::from([
            (PlateId(1), BoundaryType::Transform),
            (PlateId(2), BoundaryType::Convergent),
        ]);
        world.set_plates(vec![plate_a, TectonicPlate::default(), TectonicPlate::default()]);

        let mut regions: Vec<Region> = (0..4).map(|_| Region::default()).collect();
        regions[0].plate_id = Some(PlateId(0));
        regions[1].plate_id = Some(PlateId(1));
        regions[2].plate_id = Some(PlateId(2));
        regions[3].plate_id = Some(PlateId(0));
        regions[0].neighbors = [RegionId(1), RegionId(2), RegionId(3)].into();
        world.set_regions(regions, false).unwrap();

        assert_eq!(
            world.region_boundary(RegionId(0)).unwrap(),
            (BoundaryType::Convergent, Some(PlateId(2)))
        );
        assert_eq!(
            world.region_boundary(RegionId(3)).unwrap(),
            (BoundaryType::None, None)
        );
    }
}
