//! Elevation pass: plate base heights, boundary-driven region relief,
//! smoothing, and per-tile heights.

use glam::Vec2;

use super::GenerationContext;
use crate::world::{BoundaryType, RegionId, TileId, World};

/// Base height of continental plates, in metres.
pub const CONTINENTAL_BASE_HEIGHT: f32 = 4000.0;

/// Base height of oceanic plates, in metres.
pub const OCEANIC_BASE_HEIGHT: f32 = 2000.0;

pub(crate) fn run(world: &mut World, ctx: &GenerationContext<'_>) {
    let _span = tracing::info_span!("elevation").entered();

    for plate in world.plates_mut() {
        plate.absolute_height = if plate.is_continental {
            CONTINENTAL_BASE_HEIGHT
        } else {
            OCEANIC_BASE_HEIGHT
        };
    }

    shape_regions(world, ctx);
    smooth_regions(world, ctx.settings.smoothing_iterations);
    shape_tiles(world, ctx);

    tracing::debug!(
        mountains = world.regions().iter().filter(|r| r.is_mountain).count(),
        subduction = world.regions().iter().filter(|r| r.has_subduction).count(),
        "Elevation complete"
    );
}

/// Region height from plate base plus a boundary-dependent noise term.
fn shape_regions(world: &mut World, ctx: &GenerationContext<'_>) {
    let size = world.extent().world_size();

    for i in 0..world.regions().len() {
        let id = RegionId(i as u32);
        // Out-of-range ids are impossible here; fall back to an interior region.
        let (kind, other) = world.region_boundary(id).unwrap_or((BoundaryType::None, None));
        let region = &world.regions()[i];
        let Some(plate) = region.plate_id.and_then(|p| world.plates().get(p.index())) else {
            continue;
        };
        let base = plate.absolute_height;
        let continental = plate.is_continental;
        let other_continental = other
            .and_then(|p| world.plates().get(p.index()))
            .is_some_and(|p| p.is_continental);
        let s = ctx.noise.fbm(region.centroid / size);

        let mut subduction = false;
        let mut mountain = false;
        let height = match kind {
            BoundaryType::None => base + (1000.0 * s - 500.0),
            BoundaryType::Transform => base + (2000.0 * s - 1000.0),
            BoundaryType::Divergent => base - 2000.0 * s,
            BoundaryType::Convergent if continental => {
                mountain = true;
                base + 2000.0 * (1.0 + s)
            }
            BoundaryType::Convergent if other_continental => {
                subduction = true;
                base - 2000.0 * s
            }
            BoundaryType::Convergent => {
                // Oceanic-oceanic collision raises an island arc.
                mountain = true;
                base + 2000.0 * (1.0 + s)
            }
        };

        let region = &mut world.regions_mut()[i];
        region.absolute_height = height;
        region.has_subduction = subduction;
        region.is_mountain = mountain;
    }
}

/// Average each interior region with its neighbours, `iterations` times.
fn smooth_regions(world: &mut World, iterations: u32) {
    for _ in 0..iterations {
        let heights: Vec<f32> = world.regions().iter().map(|r| r.absolute_height).collect();
        for (i, region) in world.regions_mut().iter_mut().enumerate() {
            if region.is_boundary {
                continue;
            }
            let sum = region
                .neighbors
                .iter()
                .fold(heights[i], |acc, n| acc + heights[n.index()]);
            region.absolute_height = sum / (region.neighbors.len() + 1) as f32;
        }
    }
}

/// Tile height = region height scaled by fBm at the tile's normalised position.
fn shape_tiles(world: &mut World, ctx: &GenerationContext<'_>) {
    let extent = world.extent();
    let region_heights: Vec<f32> = world.regions().iter().map(|r| r.absolute_height).collect();

    for (i, tile) in world.tiles_mut().iter_mut().enumerate() {
        let Some(c) = extent.coordinate(TileId(i as u32)) else {
            continue;
        };
        let region_height = tile
            .region_id
            .and_then(|r| region_heights.get(r.index()).copied())
            .unwrap_or(0.0);
        let p: Vec2 = extent.normalized(c);
        tile.absolute_height = region_height * ctx.noise.fbm(p);
    }
}
