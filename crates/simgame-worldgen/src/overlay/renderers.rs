//! Per-tile colouring for each overlay kind.

use super::image::OverlayImage;
use crate::world::{BiomeType, BoundaryType, Coordinate, RegionId, Tile, World};

pub const CONTINENTAL: [u8; 3] = [0xC4, 0xA4, 0x84];
pub const OCEANIC: [u8; 3] = [0xAD, 0xD8, 0xE6];
pub const TRANSFORM: [u8; 3] = [255, 0, 0];
pub const DIVERGENT: [u8; 3] = [0, 255, 0];
pub const CONVERGENT: [u8; 3] = [0, 0, 255];
pub const EDGE: [u8; 3] = [0, 0, 0];

pub const LAKE: [u8; 3] = [0, 255, 255];
pub const RIVER: [u8; 3] = [100, 149, 237];
pub const OCEAN: [u8; 3] = [0, 0, 139];
pub const LAND: [u8; 3] = [34, 139, 34];

/// Colour for tiles whose region has no biome yet.
pub const UNCLASSIFIED: [u8; 3] = [128, 128, 128];

/// Paint every tile of `world` with `color(tile)`.
fn paint(world: &World, color: impl Fn(&Tile) -> [u8; 3]) -> OverlayImage {
    let extent = world.extent();
    let mut image = OverlayImage::new(extent.width, extent.height);
    for y in 0..extent.height {
        for x in 0..extent.width {
            let c = Coordinate::new(x, y);
            let tile = &world.tiles()[world.index_of(c)];
            image.set_pixel(x, y, color(tile));
        }
    }
    image
}

/// Crust type per plate, with boundary regions marked by boundary kind.
pub fn render_plate_tectonics(world: &World) -> OverlayImage {
    // Strongest boundary per region, computed once.
    let boundaries: Vec<BoundaryType> = (0..world.regions().len())
        .map(|i| {
            world
                .region_boundary(RegionId(i as u32))
                .map_or(BoundaryType::None, |(kind, _)| kind)
        })
        .collect();

    paint(world, |tile| {
        let Some(region_id) = tile.region_id else {
            return OCEANIC;
        };
        let Some(region) = world.regions().get(region_id.index()) else {
            return OCEANIC;
        };
        if region.is_boundary && tile.is_edge_tile {
            return EDGE;
        }
        match boundaries[region_id.index()] {
            BoundaryType::Transform => TRANSFORM,
            BoundaryType::Divergent => DIVERGENT,
            BoundaryType::Convergent => CONVERGENT,
            BoundaryType::None => {
                let continental = region
                    .plate_id
                    .and_then(|p| world.plates().get(p.index()))
                    .is_some_and(|p| p.is_continental);
                if continental { CONTINENTAL } else { OCEANIC }
            }
        }
    })
}

/// Greyscale heights normalised over the observed range.
pub fn render_height_map(world: &World) -> OverlayImage {
    let (min, max) = world
        .tiles()
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), t| {
            (lo.min(t.absolute_height), hi.max(t.absolute_height))
        });
    let range = max - min;

    paint(world, |tile| {
        let v = if range > 0.0 {
            ((tile.absolute_height - min) / range * 255.0).round() as u8
        } else {
            0
        };
        [v, v, v]
    })
}

/// Lakes, rivers, ocean, and dry land.
pub fn render_water_map(world: &World) -> OverlayImage {
    paint(world, |tile| {
        if tile.is_lake {
            LAKE
        } else if tile.is_river {
            RIVER
        } else if tile.is_water {
            OCEAN
        } else {
            LAND
        }
    })
}

/// Map a biome to an RGB color.
pub fn biome_color(biome: BiomeType) -> [u8; 3] {
    match biome {
        BiomeType::Ocean => [20, 50, 180],
        BiomeType::Lake => [60, 130, 220],
        BiomeType::TemperateForest => [30, 120, 30],
        BiomeType::TemperateSwamp => [70, 100, 60],
        BiomeType::TropicalRainforest => [10, 80, 20],
        BiomeType::TropicalSwamp => [50, 90, 40],
        BiomeType::AridShrubland => [180, 170, 60],
        BiomeType::Desert => [220, 190, 80],
        BiomeType::ExtremeDesert => [240, 220, 150],
        BiomeType::BorealForest => [40, 90, 60],
        BiomeType::ColdBog => [100, 110, 80],
        BiomeType::Tundra => [200, 210, 220],
        BiomeType::IceSheet => [245, 250, 255],
        BiomeType::SeaIce => [180, 210, 240],
        BiomeType::FrozenLake => [160, 200, 230],
    }
}

/// Each tile in its region's biome colour.
pub fn render_biome_map(world: &World) -> OverlayImage {
    paint(world, |tile| {
        tile.region_id
            .and_then(|r| world.regions().get(r.index()))
            .and_then(|r| r.biome)
            .map_or(UNCLASSIFIED, biome_color)
    })
}
