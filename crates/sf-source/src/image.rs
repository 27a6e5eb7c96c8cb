use std::path::Path;

use anyhow::{Context, Result};
use image::{GrayImage, Luma};
use sf_core::gamma::GammaLut;
use sf_core::grid::{Bitmap, IntensityGrid};
use sf_curve::CurveOrder;

/// Valeur de sortie d'un pixel encré (noir) et d'un pixel papier (blanc).
pub const INK: u8 = 0;
pub const PAPER: u8 = 255;

/// Convert an 8-bit grayscale image to ink coverage.
///
/// Luminance goes through the gamma table first. Dark pixels become ink
/// (`1 - lum`) unless `invert` is set, in which case bright pixels do.
///
/// # Errors
/// Returns an error for an empty image.
///
/// # Example
/// ```
/// use image::{GrayImage, Luma};
/// use sf_core::gamma::GammaLut;
/// use sf_core::grid::Coord;
/// use sf_source::image::intensity_from_luma;
/// let img = GrayImage::from_pixel(2, 2, Luma([0u8]));
/// let grid = intensity_from_luma(&img, &GammaLut::identity(), false).unwrap();
/// assert_eq!(grid.get(Coord::new(1, 1)), 1.0);
/// ```
pub fn intensity_from_luma(img: &GrayImage, gamma: &GammaLut, invert: bool) -> Result<IntensityGrid> {
    let (w, h) = img.dimensions();
    let data = img
        .pixels()
        .map(|&Luma([lum])| {
            let v = gamma.map(lum);
            if invert { v } else { 1.0 - v }
        })
        .collect();
    let grid = IntensityGrid::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("Image {w}×{h} inexploitable"))?;
    Ok(grid)
}

/// Charge une image (PNG, JPEG, BMP, GIF) en grille d'intensité.
///
/// # Errors
/// Returns an error if the image cannot be loaded or is empty.
///
/// # Example
/// ```no_run
/// use sf_core::gamma::GammaLut;
/// use sf_source::image::load_intensity;
/// use std::path::Path;
/// let grid = load_intensity(Path::new("photo.png"), &GammaLut::new(2.2), false).unwrap();
/// ```
pub fn load_intensity(path: &Path, gamma: &GammaLut, invert: bool) -> Result<IntensityGrid> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?
        .to_luma8();
    log::info!(
        "Image chargée : {} ({}×{})",
        path.display(),
        img.width(),
        img.height()
    );
    intensity_from_luma(&img, gamma, invert)
}

/// Bitmap → grayscale image, ink black and paper white.
#[must_use]
pub fn bitmap_to_luma(bitmap: &Bitmap) -> GrayImage {
    let raw = bitmap
        .as_slice()
        .iter()
        .map(|&ink| if ink { INK } else { PAPER })
        .collect();
    // Longueur garantie par Bitmap : width * height
    GrayImage::from_raw(bitmap.width() as u32, bitmap.height() as u32, raw)
        .unwrap_or_else(|| GrayImage::new(bitmap.width() as u32, bitmap.height() as u32))
}

/// Write a bitmap to disk; the format follows the file extension.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn save_bitmap(path: &Path, bitmap: &Bitmap) -> Result<()> {
    bitmap_to_luma(bitmap)
        .save(path)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!("Trame écrite : {}", path.display());
    Ok(())
}

/// Visitation order as a ramp: black at the first cell, white at the last.
#[must_use]
pub fn order_ramp(order: &CurveOrder) -> GrayImage {
    let last = order.len().saturating_sub(1).max(1) as f64;
    let raw = order
        .rank_map()
        .into_iter()
        .map(|rank| (rank as f64 / last * 255.0).round() as u8)
        .collect();
    GrayImage::from_raw(order.width() as u32, order.height() as u32, raw)
        .unwrap_or_else(|| GrayImage::new(order.width() as u32, order.height() as u32))
}

/// Write the curve ramp to disk.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn save_order_ramp(path: &Path, order: &CurveOrder) -> Result<()> {
    order_ramp(order)
        .save(path)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!("Parcours {} écrit : {}", order.kind(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::config::CurveKind;
    use sf_core::grid::Coord;

    #[test]
    fn dark_pixels_become_ink() -> Result<()> {
        let mut img = GrayImage::from_pixel(3, 1, Luma([255u8]));
        img.put_pixel(1, 0, Luma([0]));
        let grid = intensity_from_luma(&img, &GammaLut::identity(), false)?;
        assert!(grid.get(Coord::new(0, 0)).abs() < f32::EPSILON);
        assert!((grid.get(Coord::new(0, 1)) - 1.0).abs() < f32::EPSILON);
        let inverted = intensity_from_luma(&img, &GammaLut::identity(), true)?;
        assert!((inverted.get(Coord::new(0, 0)) - 1.0).abs() < f32::EPSILON);
        Ok(())
    }

    #[test]
    fn bitmap_maps_ink_to_black() -> Result<()> {
        let mut bm = Bitmap::new(2, 1)?;
        bm.set(Coord::new(0, 1), true);
        let img = bitmap_to_luma(&bm);
        assert_eq!(img.get_pixel(0, 0).0, [PAPER]);
        assert_eq!(img.get_pixel(1, 0).0, [INK]);
        Ok(())
    }

    #[test]
    fn ramp_starts_black_and_ends_white() -> Result<()> {
        let order = CurveOrder::generate(CurveKind::Hilbert, 4, 4)?;
        let img = order_ramp(&order);
        let first = order.as_slice()[0];
        let last = order.as_slice()[15];
        assert_eq!(img.get_pixel(first.col as u32, first.row as u32).0, [0]);
        assert_eq!(img.get_pixel(last.col as u32, last.row as u32).0, [255]);
        Ok(())
    }

    #[test]
    fn saved_bitmap_reloads_as_same_ink() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("trame.png");
        let mut bm = Bitmap::new(3, 2)?;
        bm.set(Coord::new(1, 2), true);
        save_bitmap(&path, &bm)?;
        let grid = load_intensity(&path, &GammaLut::identity(), false)?;
        assert!((grid.get(Coord::new(1, 2)) - 1.0).abs() < f32::EPSILON);
        assert!(grid.get(Coord::new(0, 0)).abs() < f32::EPSILON);
        Ok(())
    }
}
