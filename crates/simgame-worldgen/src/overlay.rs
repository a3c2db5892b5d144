//! Map overlays: RGBA rasters derived from a generated [`World`].
//!
//! Every overlay is a pure function of the world, one pixel per tile,
//! row-major from the top-left corner, alpha always 255.

mod image;
mod renderers;

pub use self::image::OverlayImage;
pub use renderers::{
    biome_color, render_biome_map, render_height_map, render_plate_tectonics, render_water_map,
};

use crate::world::World;

/// Which overlay to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Overlay {
    /// Crust type and plate boundary kinds.
    PlateTectonics,
    /// Normalised greyscale elevation.
    HeightMap,
    /// Ocean, lakes, and rivers.
    WaterMap,
    /// Region biomes.
    BiomeMap,
}

impl Overlay {
    /// Every overlay kind.
    pub const ALL: [Overlay; 4] = [
        Self::PlateTectonics,
        Self::HeightMap,
        Self::WaterMap,
        Self::BiomeMap,
    ];

    /// Stable lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::PlateTectonics => "plates",
            Self::HeightMap => "height",
            Self::WaterMap => "water",
            Self::BiomeMap => "biome",
        }
    }

    /// Inverse of [`Overlay::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.name() == name)
    }
}

impl std::fmt::Display for Overlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Render `overlay` for `world`.
pub fn render_overlay(world: &World, overlay: Overlay) -> OverlayImage {
    match overlay {
        Overlay::PlateTectonics => render_plate_tectonics(world),
        Overlay::HeightMap => render_height_map(world),
        Overlay::WaterMap => render_water_map(world),
        Overlay::BiomeMap => render_biome_map(world),
    }
}

/// Raw RGBA bytes of `overlay`, `dimension * dimension * 4` long.
pub fn get_overlay(world: &World, overlay: Overlay) -> Vec<u8> {
    render_overlay(world, overlay).into_pixels()
}
