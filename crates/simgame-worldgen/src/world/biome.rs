//! Biome classification: the closed set of biome kinds and their stable names.

/// Biome assigned to a region by the climate pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BiomeType {
    Ocean,
    Lake,
    TemperateForest,
    TemperateSwamp,
    TropicalRainforest,
    TropicalSwamp,
    AridShrubland,
    Desert,
    ExtremeDesert,
    BorealForest,
    ColdBog,
    Tundra,
    IceSheet,
    SeaIce,
    FrozenLake,
}

impl BiomeType {
    /// Every biome, in declaration order.
    pub const ALL: [BiomeType; 15] = [
        Self::Ocean,
        Self::Lake,
        Self::TemperateForest,
        Self::TemperateSwamp,
        Self::TropicalRainforest,
        Self::TropicalSwamp,
        Self::AridShrubland,
        Self::Desert,
        Self::ExtremeDesert,
        Self::BorealForest,
        Self::ColdBog,
        Self::Tundra,
        Self::IceSheet,
        Self::SeaIce,
        Self::FrozenLake,
    ];

    /// Stable name, used by the save format.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ocean => "OCEAN",
            Self::Lake => "LAKE",
            Self::TemperateForest => "TEMPERATE_FOREST",
            Self::TemperateSwamp => "TEMPERATE_SWAMP",
            Self::TropicalRainforest => "TROPICAL_RAINFOREST",
            Self::TropicalSwamp => "TROPICAL_SWAMP",
            Self::AridShrubland => "ARID_SHRUBLAND",
            Self::Desert => "DESERT",
            Self::ExtremeDesert => "EXTREME_DESERT",
            Self::BorealForest => "BOREAL_FOREST",
            Self::ColdBog => "COLD_BOG",
            Self::Tundra => "TUNDRA",
            Self::IceSheet => "ICE_SHEET",
            Self::SeaIce => "SEA_ICE",
            Self::FrozenLake => "FROZEN_LAKE",
        }
    }

    /// Inverse of [`BiomeType::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// `true` for biomes that only occur on open ocean.
    pub const fn is_ocean(self) -> bool {
        matches!(self, Self::Ocean | Self::SeaIce)
    }

    /// `true` for biomes that only occur on lakes.
    pub const fn is_lake(self) -> bool {
        matches!(self, Self::Lake | Self::FrozenLake)
    }

    /// `true` for biomes assigned to dry land.
    pub const fn is_land(self) -> bool {
        !self.is_ocean() && !self.is_lake()
    }
}

impl std::fmt::Display for BiomeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
