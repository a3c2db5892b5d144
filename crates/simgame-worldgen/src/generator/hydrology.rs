//! Hydrology pass: ocean level, flow accumulation, lakes, overflow, rivers.
//!
//! Flow is traced highest tile first, so by the time a tile hands its
//! accumulation downhill every upstream contribution has already arrived.
//! Lake overflow is a single pass: a spill can open a new basin that is not
//! revisited.

use super::GenerationContext;
use crate::world::{Coordinate, Extent, RegionId, Tile, TileId, World};

pub(crate) fn run(world: &mut World, ctx: &GenerationContext<'_>) {
    let _span = tracing::info_span!("hydrology").entered();

    let level = ocean_level_for(world.tiles(), world.params().percent_land);
    world.set_ocean_level(level);
    mark_oceans(world.tiles_mut(), level);

    let extent = world.extent();
    trace_flow(extent, world.tiles_mut());
    let lakes = identify_lakes(extent, world.tiles_mut());
    raise_lakes(world.tiles_mut(), &lakes, ctx.settings.lake_overflow_divisor);
    let spills = spill_lakes(extent, world.tiles_mut(), &lakes);
    mark_rivers(world.tiles_mut(), ctx.settings.river_threshold);
    propagate_to_regions(world);

    tracing::debug!(
        ocean_level = level,
        lakes = lakes.len(),
        spills,
        "Hydrology complete"
    );
}

/// Height at the `1 - percent_land/100` quantile of all tile heights.
pub(crate) fn ocean_level_for(tiles: &[Tile], percent_land: f32) -> f32 {
    if tiles.is_empty() {
        return 0.0;
    }
    let mut heights: Vec<f32> = tiles.iter().map(|t| t.absolute_height).collect();
    heights.sort_by(f32::total_cmp);
    let n = heights.len();
    let index = (n as f64 * (1.0 - f64::from(percent_land) / 100.0)).floor() as usize;
    heights[index.min(n - 1)]
}

/// Recompute tile flow fields of a loaded world.
///
/// Replays flow tracing with only ocean tiles counted as water (lakes did not
/// exist yet at that stage), then reapplies lake overflow with the stored
/// lake levels. The result matches the original generation run exactly.
pub(crate) fn restore_flow(world: &mut World) {
    let extent = world.extent();
    trace_flow(extent, world.tiles_mut());
    let lakes: Vec<usize> = world
        .tiles()
        .iter()
        .enumerate()
        .filter_map(|(i, t)| t.is_lake.then_some(i))
        .collect();
    spill_lakes(extent, world.tiles_mut(), &lakes);
}

fn mark_oceans(tiles: &mut [Tile], level: f32) {
    for tile in tiles {
        if tile.absolute_height < level {
            tile.is_water = true;
            tile.is_lake = false;
            tile.water_level = level;
        }
    }
}

#[inline]
fn coordinate(extent: Extent, index: usize) -> Coordinate {
    extent
        .coordinate(TileId(index as u32))
        .unwrap_or_default()
}

#[inline]
fn index(extent: Extent, c: Coordinate) -> usize {
    c.y as usize * extent.width as usize + c.x as usize
}

/// Seed land tiles with one unit of flow and route it downhill.
fn trace_flow(extent: Extent, tiles: &mut [Tile]) {
    for (i, tile) in tiles.iter_mut().enumerate() {
        tile.flow_direction = coordinate(extent, i);
        tile.flow_accumulation = if tile.is_ocean() { 0.0 } else { 1.0 };
    }

    let mut order: Vec<usize> = (0..tiles.len()).collect();
    order.sort_by(|&a, &b| {
        tiles[b]
            .absolute_height
            .total_cmp(&tiles[a].absolute_height)
            .then(a.cmp(&b))
    });

    // Only ocean counts as water while tracing.
    let traced_height = |t: &Tile| {
        if t.is_ocean() {
            t.water_level
        } else {
            t.absolute_height
        }
    };

    for i in order {
        if tiles[i].is_ocean() {
            continue;
        }
        let c = coordinate(extent, i);
        let own = tiles[i].absolute_height;

        let mut lowest: Option<(usize, f32)> = None;
        for n in extent.neighbors4(c) {
            let j = index(extent, n);
            let e = traced_height(&tiles[j]);
            if e < own && lowest.is_none_or(|(_, best)| e < best) {
                lowest = Some((j, e));
            }
        }

        if let Some((j, _)) = lowest {
            tiles[i].flow_direction = coordinate(extent, j);
            let carried = tiles[i].flow_accumulation;
            tiles[j].flow_accumulation += carried;
        }
    }
}

/// Mark strict local minima that collected upstream flow as lakes.
fn identify_lakes(extent: Extent, tiles: &mut [Tile]) -> Vec<usize> {
    let mut lakes = Vec::new();
    for i in 0..tiles.len() {
        let tile = &tiles[i];
        if tile.is_water || tile.flow_accumulation <= 1.0 {
            continue;
        }
        let own = tile.absolute_height;
        let c = coordinate(extent, i);
        let is_sink = extent
            .neighbors4(c)
            .all(|n| tiles[index(extent, n)].effective_height() > own);
        if is_sink {
            let tile = &mut tiles[i];
            tile.is_water = true;
            tile.is_lake = true;
            tile.water_level = tile.absolute_height;
            lakes.push(i);
        }
    }
    lakes
}

/// Raise each lake surface in proportion to the flow it collected.
fn raise_lakes(tiles: &mut [Tile], lakes: &[usize], divisor: f32) {
    for &i in lakes {
        let tile = &mut tiles[i];
        tile.water_level = tile.absolute_height + tile.flow_accumulation / divisor;
    }
}

/// Spill lakes whose surface tops their lowest non-lake neighbour.
///
/// Returns the number of lakes that overflowed.
fn spill_lakes(extent: Extent, tiles: &mut [Tile], lakes: &[usize]) -> usize {
    let mut spills = 0;
    for &i in lakes {
        let c = coordinate(extent, i);
        let mut outlet: Option<(usize, f32)> = None;
        for n in extent.neighbors4(c) {
            let j = index(extent, n);
            if tiles[j].is_lake {
                continue;
            }
            let e = tiles[j].effective_height();
            if outlet.is_none_or(|(_, best)| e < best) {
                outlet = Some((j, e));
            }
        }

        let Some((j, outlet_height)) = outlet else {
            continue;
        };
        let level = tiles[i].water_level;
        if level > outlet_height {
            tiles[j].flow_accumulation += level - outlet_height;
            tiles[i].flow_direction = coordinate(extent, j);
            spills += 1;
        }
    }
    spills
}

fn mark_rivers(tiles: &mut [Tile], threshold: f32) {
    for tile in tiles {
        tile.is_river = !tile.is_water && tile.flow_accumulation >= threshold;
    }
}

#[derive(Clone, Copy, Default)]
struct RegionWater {
    ocean: bool,
    lake: bool,
    river: bool,
    water_level: f32,
    max_flow: Option<(usize, f32)>,
}

/// Summarise tile hydrology onto regions.
fn propagate_to_regions(world: &mut World) {
    let extent = world.extent();
    let mut summary = vec![RegionWater::default(); world.regions().len()];

    for (i, tile) in world.tiles().iter().enumerate() {
        let Some(entry) = tile.region_id.and_then(|r| summary.get_mut(r.index())) else {
            continue;
        };
        entry.ocean |= tile.is_ocean();
        entry.lake |= tile.is_lake;
        entry.river |= tile.is_river;
        if tile.is_water {
            entry.water_level = entry.water_level.max(tile.water_level);
        }
        if entry
            .max_flow
            .is_none_or(|(_, best)| tile.flow_accumulation > best)
        {
            entry.max_flow = Some((i, tile.flow_accumulation));
        }
    }

    let downstream: Vec<Option<RegionId>> = summary
        .iter()
        .map(|s| {
            s.max_flow.and_then(|(i, _)| {
                let target = world.tiles()[i].flow_direction;
                world.tiles()[index(extent, target)].region_id
            })
        })
        .collect();

    for ((region, s), down) in world.regions_mut().iter_mut().zip(&summary).zip(downstream) {
        region.is_ocean = s.ocean;
        region.is_lake = s.lake && !s.ocean;
        region.is_water = region.is_ocean || region.is_lake;
        region.has_river = s.river;
        region.water_level = s.water_level;
        region.flow_accumulation = s.max_flow.map_or(0.0, |(_, f)| f);
        region.flow_direction = down;
    }

    let ocean: Vec<bool> = world.regions().iter().map(|r| r.is_ocean).collect();
    for region in world.regions_mut() {
        region.is_coastal =
            !region.is_water && region.neighbors.iter().any(|n| ocean[n.index()]);
    }
}
