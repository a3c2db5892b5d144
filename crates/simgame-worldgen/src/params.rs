//! Validated generator inputs and the counts derived from them.

use crate::error::WorldError;
use crate::hash::fnv1a_str;
use crate::seed::WorldSeed;

/// Allowed world edge lengths, in tiles (worlds are square).
pub const DIMENSION_OPTIONS: [u32; 4] = [64, 128, 256, 512];

/// Allowed continent counts.
pub const CONTINENT_OPTIONS: [u32; 4] = [2, 4, 8, 16];

/// Allowed land percentages.
pub const PERCENT_LAND_OPTIONS: [u32; 5] = [30, 40, 50, 60, 70];

/// Allowed target region sizes, in tiles per region.
pub const REGION_SIZE_OPTIONS: [u32; 6] = [4, 8, 16, 32, 64, 128];

/// User-chosen inputs to world generation.
///
/// Fields are public so UIs can bind to them directly; [`WorldParams::validate`]
/// is called by the generator and the loader before anything is built.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldParams {
    /// Display name; also the save directory name.
    pub name: String,
    /// Free-form seed text, hashed into [`WorldParams::seed`].
    pub seed_ascii: String,
    /// Edge length in tiles.
    pub dimension: u32,
    /// Number of continental plates.
    pub num_continents: u32,
    /// Percentage of tiles that end up above the ocean level.
    pub percent_land: f32,
    /// Target number of tiles per region.
    pub region_size: u32,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            name: "New World".to_string(),
            seed_ascii: "Coffee".to_string(),
            dimension: 256,
            num_continents: 4,
            percent_land: 40.0,
            region_size: 16,
        }
    }
}

impl WorldParams {
    /// Numeric seed: FNV-1a of `seed_ascii`.
    pub fn seed(&self) -> WorldSeed {
        WorldSeed(fnv1a_str(&self.seed_ascii))
    }

    /// Land percentage as an integer, for exact arithmetic.
    fn percent_land_whole(&self) -> u32 {
        self.percent_land.round() as u32
    }

    /// `ceil(num_continents * 100 / percent_land)`.
    ///
    /// Saturates instead of overflowing on unvalidated inputs.
    pub fn num_plates(&self) -> u32 {
        self.num_continents
            .saturating_mul(100)
            .div_ceil(self.percent_land_whole().max(1))
    }

    /// `dimension^2 / region_size`, saturating like [`WorldParams::num_plates`].
    pub fn num_regions(&self) -> u32 {
        self.dimension.saturating_mul(self.dimension) / self.region_size.max(1)
    }

    /// Total tile count.
    pub fn num_tiles(&self) -> usize {
        self.dimension as usize * self.dimension as usize
    }

    /// Fraction of tiles that should be land, in `[0, 1]`.
    pub fn land_fraction(&self) -> f32 {
        self.percent_land / 100.0
    }

    /// Check every field against its option set.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidArgument`] naming the first offending field.
    pub fn validate(&self) -> Result<(), WorldError> {
        if !DIMENSION_OPTIONS.contains(&self.dimension) {
            return Err(WorldError::InvalidArgument(format!(
                "dimension {} not in {DIMENSION_OPTIONS:?}",
                self.dimension
            )));
        }
        if !CONTINENT_OPTIONS.contains(&self.num_continents) {
            return Err(WorldError::InvalidArgument(format!(
                "num_continents {} not in {CONTINENT_OPTIONS:?}",
                self.num_continents
            )));
        }
        let whole = self.percent_land_whole();
        if !self.percent_land.is_finite()
            || self.percent_land != whole as f32
            || !PERCENT_LAND_OPTIONS.contains(&whole)
        {
            return Err(WorldError::InvalidArgument(format!(
                "percent_land {} not in {PERCENT_LAND_OPTIONS:?}",
                self.percent_land
            )));
        }
        if !REGION_SIZE_OPTIONS.contains(&self.region_size) {
            return Err(WorldError::InvalidArgument(format!(
                "region_size {} not in {REGION_SIZE_OPTIONS:?}",
                self.region_size
            )));
        }
        Ok(())
    }
}
