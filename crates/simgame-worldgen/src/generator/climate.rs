//! Climate pass: latitude bands, temperature, moisture, and biomes.

use crate::world::{BiomeType, Region, World};

/// Mean temperature at the equator, in degrees Celsius.
pub const TEMP_EQUATOR: f32 = 40.0;
/// Mean temperature at either pole, in degrees Celsius.
pub const TEMP_POLES: f32 = -30.0;
/// Seasonal variance reached at the poles.
pub const MAX_VARIANCE: f32 = 20.0;
/// Cooling per kilometre above the ocean surface.
pub const LAPSE_RATE_PER_KM: f32 = 6.5;

const ICE_TEMPERATURE: f32 = -20.0;
const TROPICAL_VARIANCE: f32 = 4.0;

pub(crate) fn run(world: &mut World) {
    let _span = tracing::info_span!("climate").entered();

    let height = world.extent().world_size().y;
    let ocean_level = world.ocean_level();
    for region in world.regions_mut() {
        region.latitude = region.centroid.y / height;
        let (temperature, variance) =
            temperature_at(region.latitude, region.absolute_height, ocean_level);
        region.temperature = temperature;
        region.temperature_variance = variance;
    }

    let moisture: Vec<f32> = (0..world.regions().len())
        .map(|i| moisture_of(world.regions(), i))
        .collect();

    for (region, moisture) in world.regions_mut().iter_mut().zip(moisture) {
        region.moisture = moisture;
        let biome = classify(region);
        region.is_swamp = matches!(biome, BiomeType::TemperateSwamp | BiomeType::TropicalSwamp);
        region.is_frozen = region.temperature < ICE_TEMPERATURE;
        region.biome = Some(biome);
    }

    tracing::debug!(
        frozen = world.regions().iter().filter(|r| r.is_frozen).count(),
        swamps = world.regions().iter().filter(|r| r.is_swamp).count(),
        "Climate complete"
    );
}

/// Temperature and seasonal variance at `latitude` for a surface at `height`.
pub fn temperature_at(latitude: f32, height: f32, ocean_level: f32) -> (f32, f32) {
    let offset = ((latitude - 0.5) * 2.0).abs();
    let mut temperature = TEMP_POLES + (TEMP_EQUATOR - TEMP_POLES) * (1.0 - offset);
    if height > ocean_level {
        temperature -= (height - ocean_level) / 1000.0 * LAPSE_RATE_PER_KM;
    }
    (temperature, MAX_VARIANCE * offset)
}

fn moisture_of(regions: &[Region], i: usize) -> f32 {
    let region = &regions[i];
    if region.is_water {
        return 100.0;
    }
    if region.has_river {
        return 60.0;
    }

    let near = |pick: fn(&Region) -> bool| {
        region.neighbors.iter().any(|n| pick(&regions[n.index()]))
    };
    let two_hop = |pick: fn(&Region) -> bool| {
        region.neighbors.iter().any(|n| {
            regions[n.index()]
                .neighbors
                .iter()
                .any(|m| m.index() != i && pick(&regions[m.index()]))
        })
    };

    if near(|r| r.is_water) {
        80.0
    } else if near(|r| r.has_river) {
        70.0
    } else if two_hop(|r| r.is_water) {
        60.0
    } else if two_hop(|r| r.has_river) {
        50.0
    } else {
        30.0
    }
}

/// Whittaker-style classification; the first matching rule wins.
fn classify(region: &Region) -> BiomeType {
    let t = region.temperature;
    let m = region.moisture;

    if region.is_ocean {
        return if t < ICE_TEMPERATURE { BiomeType::SeaIce } else { BiomeType::Ocean };
    }
    if region.is_lake {
        return if t < ICE_TEMPERATURE { BiomeType::FrozenLake } else { BiomeType::Lake };
    }

    if t < ICE_TEMPERATURE {
        BiomeType::IceSheet
    } else if t < 0.0 && (m < 50.0 || region.is_mountain) {
        BiomeType::Tundra
    } else if t < 10.0 && (m < 80.0 || region.has_river) {
        BiomeType::BorealForest
    } else if t < 10.0 {
        BiomeType::ColdBog
    } else if t > 27.5 {
        if m < 50.0 {
            BiomeType::ExtremeDesert
        } else if m < 60.0 {
            BiomeType::Desert
        } else {
            BiomeType::AridShrubland
        }
    } else {
        let swamp = m >= 80.0 && !region.has_river;
        match (region.temperature_variance < TROPICAL_VARIANCE, swamp) {
            (true, true) => BiomeType::TropicalSwamp,
            (true, false) => BiomeType::TropicalRainforest,
            (false, true) => BiomeType::TemperateSwamp,
            (false, false) => BiomeType::TemperateForest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::RegionId;

    fn land(temperature: f32, moisture: f32) -> Region {
        Region {
            temperature,
            moisture,
            temperature_variance: 10.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_temperature_profile() {
        assert_eq!(temperature_at(0.5, 0.0, 0.0), (40.0, 0.0));
        assert_eq!(temperature_at(0.0, 0.0, 0.0), (-30.0, 20.0));
        assert_eq!(temperature_at(1.0, 0.0, 0.0), (-30.0, 20.0));
        // Two kilometres above the sea is 13 degrees colder.
        let (t, _) = temperature_at(0.5, 2500.0, 500.0);
        assert!((t - 27.0).abs() < 1e-4, "got {t}");
        // Below the ocean level there is no lapse.
        assert_eq!(temperature_at(0.5, 100.0, 500.0).0, 40.0);
    }

    #[test]
    fn test_water_biomes() {
        let ocean = Region { is_ocean: true, is_water: true, temperature: 5.0, ..Default::default() };
        assert_eq!(classify(&ocean), BiomeType::Ocean);
        let polar = Region { temperature: -25.0, ..ocean.clone() };
        assert_eq!(classify(&polar), BiomeType::SeaIce);

        let lake = Region { is_lake: true, is_water: true, temperature: 5.0, ..Default::default() };
        assert_eq!(classify(&lake), BiomeType::Lake);
        let frozen = Region { temperature: -21.0, ..lake.clone() };
        assert_eq!(classify(&frozen), BiomeType::FrozenLake);
    }

    #[test]
    fn test_land_rule_order() {
        assert_eq!(classify(&land(-25.0, 100.0)), BiomeType::IceSheet);
        assert_eq!(classify(&land(-5.0, 30.0)), BiomeType::Tundra);
        assert_eq!(
            classify(&Region { is_mountain: true, ..land(-5.0, 90.0) }),
            BiomeType::Tundra
        );
        assert_eq!(classify(&land(-5.0, 90.0)), BiomeType::ColdBog);
        assert_eq!(classify(&land(5.0, 60.0)), BiomeType::BorealForest);
        assert_eq!(
            classify(&Region { has_river: true, ..land(5.0, 90.0) }),
            BiomeType::BorealForest
        );
        assert_eq!(classify(&land(30.0, 30.0)), BiomeType::ExtremeDesert);
        assert_eq!(classify(&land(30.0, 55.0)), BiomeType::Desert);
        assert_eq!(classify(&land(30.0, 70.0)), BiomeType::AridShrubland);
        assert_eq!(classify(&land(20.0, 30.0)), BiomeType::TemperateForest);
        assert_eq!(classify(&land(20.0, 80.0)), BiomeType::TemperateSwamp);
        let tropical = Region { temperature_variance: 2.0, ..land(20.0, 80.0) };
        assert_eq!(classify(&tropical), BiomeType::TropicalSwamp);
        let rainforest = Region { temperature_variance: 2.0, ..land(20.0, 50.0) };
        assert_eq!(classify(&rainforest), BiomeType::TropicalRainforest);
    }

    /// A chain of regions `0 - 1 - 2 - 3 - 4`.
    fn chain(len: u32) -> Vec<Region> {
        (0..len)
            .map(|i| {
                let mut region = Region::default();
                if i > 0 {
                    region.neighbors.insert(RegionId(i - 1));
                }
                if i + 1 < len {
                    region.neighbors.insert(RegionId(i + 1));
                }
                region
            })
            .collect()
    }

    #[test]
    fn test_moisture_by_distance_to_water() {
        let mut regions = chain(5);
        regions[0].is_water = true;
        regions[0].is_ocean = true;
        assert_eq!(moisture_of(&regions, 0), 100.0);
        assert_eq!(moisture_of(&regions, 1), 80.0);
        assert_eq!(moisture_of(&regions, 2), 60.0);
        assert_eq!(moisture_of(&regions, 3), 30.0);
    }

    #[test]
    fn test_moisture_by_distance_to_river() {
        let mut regions = chain(5);
        regions[4].has_river = true;
        assert_eq!(moisture_of(&regions, 4), 60.0);
        assert_eq!(moisture_of(&regions, 3), 70.0);
        assert_eq!(moisture_of(&regions, 2), 50.0);
        assert_eq!(moisture_of(&regions, 1), 30.0);
    }
}
