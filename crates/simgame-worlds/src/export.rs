//! PNG export of overlay images.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use simgame_worldgen::OverlayImage;

use crate::error::AppError;

/// Write `image` as an 8-bit RGBA PNG at `path`.
pub fn write_png(image: &OverlayImage, path: &Path) -> Result<(), AppError> {
    let png_err = |source| AppError::Png {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width, image.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().map_err(png_err)?;
    writer.write_image_data(&image.pixels).map_err(png_err)?;
    writer.finish().map_err(png_err)?;
    Ok(())
}
