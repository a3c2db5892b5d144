//! Tectonics pass: plates, crust types, velocities, regions, and boundaries.

use std::collections::BTreeSet;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::GenerationContext;
use crate::error::WorldError;
use crate::seed::Stream;
use crate::voronoi::{NearestIndex, Voronoi, uniform_points};
use crate::world::{BoundaryType, PlateId, Region, RegionId, TectonicPlate, World};

pub(crate) fn run(world: &mut World, ctx: &GenerationContext<'_>) -> Result<(), WorldError> {
    let _span = tracing::info_span!("tectonics").entered();

    let params = world.params().clone();
    let size = world.extent().world_size();
    let num_plates = params.num_plates() as usize;

    let plate_centroids = uniform_points(num_plates, size, &mut ctx.seed.stream(Stream::Plates));
    let mut plates = build_plates(&plate_centroids, params.num_continents as usize, ctx);

    let voronoi = Voronoi::generate(
        params.num_regions() as usize,
        size,
        params.dimension as usize,
        &mut ctx.seed.stream(Stream::Regions),
    )?;
    let plate_index = NearestIndex::new(plate_centroids, size)?;

    let (centroids, adjacency) = voronoi.into_parts();
    let mut regions: Vec<Region> = centroids
        .into_iter()
        .zip(adjacency)
        .map(|(centroid, neighbors)| Region {
            neighbors: neighbors.into_iter().map(RegionId).collect(),
            plate_id: Some(PlateId(plate_index.nearest(centroid))),
            ..Region::new(centroid)
        })
        .collect();

    let pairs = mark_boundaries(&mut regions);
    let threshold_cos = libm::cosf(ctx.settings.divergence_threshold_deg.to_radians());
    for &(a, b) in &pairs {
        let kind = BoundaryType::classify(
            plates[a.index()].centroid,
            plates[a.index()].velocity,
            plates[b.index()].centroid,
            plates[b.index()].velocity,
            threshold_cos,
        );
        plates[a.index()].boundaries.insert(b, kind);
        plates[b.index()].boundaries.insert(a, kind);
    }

    tracing::debug!(
        plates = plates.len(),
        regions = regions.len(),
        plate_boundaries = pairs.len(),
        "Tectonics complete"
    );

    world.set_plates(plates);
    world.set_regions(regions, true)
}

/// Place plates, pick the continental ones, and draw velocities.
fn build_plates(
    centroids: &[Vec2],
    num_continents: usize,
    ctx: &GenerationContext<'_>,
) -> Vec<TectonicPlate> {
    let mut order: Vec<usize> = (0..centroids.len()).collect();
    order.shuffle(&mut ctx.seed.stream(Stream::Continents));
    let mut continental = vec![false; centroids.len()];
    for &i in order.iter().take(num_continents) {
        continental[i] = true;
    }

    let mut rng = ctx.seed.stream(Stream::Velocities);
    centroids
        .iter()
        .zip(continental)
        .map(|(&centroid, is_continental)| {
            // sqrt keeps the draw uniform over the disk's area.
            let radius = rng.random::<f32>().sqrt() * ctx.settings.plate_speed;
            let angle = rng.random::<f32>() * TAU;
            TectonicPlate {
                centroid,
                velocity: Vec2::new(libm::cosf(angle), libm::sinf(angle)) * radius,
                is_continental,
                ..Default::default()
            }
        })
        .collect()
}

/// Set `is_boundary` on every region and collect the adjacent plate pairs `(a, b)`, `a < b`.
fn mark_boundaries(regions: &mut [Region]) -> BTreeSet<(PlateId, PlateId)> {
    let mut pairs = BTreeSet::new();
    for i in 0..regions.len() {
        let Some(own) = regions[i].plate_id else {
            continue;
        };
        let mut on_boundary = false;
        for n in &regions[i].neighbors {
            if let Some(other) = regions[n.index()].plate_id
                && other != own
            {
                on_boundary = true;
                pairs.insert((own.min(other), own.max(other)));
            }
        }
        regions[i].is_boundary = on_boundary;
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GenerationSettings;
    use crate::noise::NoiseField;
    use crate::params::WorldParams;

    fn tectonic_world(seed: &str, continents: u32, land: f32) -> World {
        let params = WorldParams {
            name: "Plates".into(),
            seed_ascii: seed.into(),
            dimension: 64,
            num_continents: continents,
            percent_land: land,
            region_size: 16,
        };
        let settings = GenerationSettings::default();
        let ctx = GenerationContext {
            seed: params.seed(),
            noise: NoiseField::new(params.seed().value(), settings.noise),
            settings: &settings,
        };
        let mut world = World::new(params).unwrap();
        run(&mut world, &ctx).unwrap();
        world
    }

    #[test]
    fn test_plate_and_region_counts() {
        let world = tectonic_world("Coffee", 2, 50.0);
        assert_eq!(world.plates().len(), 4);
        assert_eq!(world.regions().len(), 256);
        assert_eq!(world.plates().iter().filter(|p| p.is_continental).count(), 2);
    }

    #[test]
    fn test_every_tile_has_a_valid_region() {
        let world = tectonic_world("Granite", 4, 40.0);
        for tile in world.tiles() {
            let id = tile.region_id.expect("tile left unassigned");
            assert!(id.index() < world.regions().len());
        }
    }

    #[test]
    fn test_region_boundary_flag_matches_neighbours() {
        let world = tectonic_world("Basalt", 4, 30.0);
        for region in world.regions() {
            let expected = region
                .neighbors
                .iter()
                .any(|n| world.regions()[n.index()].plate_id != region.plate_id);
            assert_eq!(region.is_boundary, expected);
        }
    }

    #[test]
    fn test_plate_boundaries_symmetric_and_never_none() {
        let world = tectonic_world("Magma", 8, 60.0);
        for (a, plate) in world.plates().iter().enumerate() {
            for (b, kind) in &plate.boundaries {
                assert_ne!(*kind, BoundaryType::None);
                assert_eq!(
                    world.plates()[b.index()].boundary_with(PlateId(a as u32)),
                    *kind,
                    "boundary {a} <-> {} not symmetric",
                    b.0
                );
            }
        }
    }

    #[test]
    fn test_velocities_within_disk() {
        let world = tectonic_world("Drift", 16, 70.0);
        for plate in world.plates() {
            assert!(plate.velocity.length() <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_deterministic_for_same_seed() {
        let a = tectonic_world("Coffee", 2, 50.0);
        let b = tectonic_world("Coffee", 2, 50.0);
        assert_eq!(a, b);
    }
}
