//! The world generation pipeline.
//!
//! `WorldParams -> tectonics -> elevation -> hydrology -> climate -> World`.
//! Each pass reads and writes only the [`World`]; the shared
//! [`GenerationContext`] carries the seed, the noise field, and tunables.

mod climate;
mod elevation;
mod hydrology;
mod tectonics;

pub(crate) use hydrology::{ocean_level_for, restore_flow};

use crate::error::WorldError;
use crate::noise::{NoiseField, NoiseParams};
use crate::params::WorldParams;
use crate::seed::WorldSeed;
use crate::world::World;

/// Tunable constants of the generator. Defaults are the reference values.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationSettings {
    /// Angle (degrees) within which relative plate motion counts as head-on.
    pub divergence_threshold_deg: f32,
    /// Radius of the disk plate velocities are drawn from.
    pub plate_speed: f32,
    /// Octave settings for every fBm sample.
    pub noise: NoiseParams,
    /// Neighbourhood-average passes over interior regions.
    pub smoothing_iterations: u32,
    /// Minimum flow accumulation for a land tile to become a river.
    pub river_threshold: f32,
    /// Accumulation units per metre of lake rise.
    pub lake_overflow_divisor: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            divergence_threshold_deg: 30.0,
            plate_speed: 1.0,
            noise: NoiseParams::default(),
            smoothing_iterations: 3,
            river_threshold: 50.0,
            lake_overflow_divisor: 100.0,
        }
    }
}

/// State shared by every pass of a single generation run.
pub(crate) struct GenerationContext<'a> {
    pub(crate) seed: WorldSeed,
    pub(crate) noise: NoiseField,
    pub(crate) settings: &'a GenerationSettings,
}

/// Runs the generation passes in order.
#[derive(Clone, Debug, Default)]
pub struct WorldGenerator {
    settings: GenerationSettings,
}

impl WorldGenerator {
    /// A generator with custom settings.
    pub fn new(settings: GenerationSettings) -> Self {
        Self { settings }
    }

    /// Current settings.
    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Build a fully populated world from `params`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] when `params` fails validation.
    pub fn generate(&self, params: WorldParams) -> Result<World, WorldError> {
        let span = tracing::info_span!(
            "generate_world",
            name = %params.name,
            seed = %params.seed_ascii,
            dimension = params.dimension
        );
        let _guard = span.enter();

        let seed = params.seed();
        let mut world = World::new(params)?;
        let ctx = GenerationContext {
            seed,
            noise: NoiseField::new(seed.value(), self.settings.noise),
            settings: &self.settings,
        };

        tectonics::run(&mut world, &ctx)?;
        elevation::run(&mut world, &ctx);
        hydrology::run(&mut world, &ctx);
        climate::run(&mut world);

        let stats = world.stats();
        tracing::info!(
            land_fraction = stats.land_fraction,
            lakes = stats.lake_tiles,
            rivers = stats.river_tiles,
            "World generated"
        );
        Ok(world)
    }
}

/// Generate a world with the default settings.
///
/// # Errors
///
/// Returns [`WorldError::InvalidArgument`] when `params` fails validation.
pub fn generate(params: WorldParams) -> Result<World, WorldError> {
    WorldGenerator::default().generate(params)
}
