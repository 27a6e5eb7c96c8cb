//! Rehaussement de contours avant tramage (unsharp mask).
//!
//! `out = v + amount * (v - blur(v))`, clamped to [0, 1]. The blur is a
//! separable box filter whose window is clipped at the borders.

use rayon::prelude::*;
use sf_core::error::HalftoneError;
use sf_core::grid::IntensityGrid;

/// Separable box blur of radius `radius`, row-major output.
///
/// # Example
/// ```
/// use sf_core::grid::IntensityGrid;
/// use sf_halftone::prefilter::box_blur;
/// let grid = IntensityGrid::filled(5, 4, 0.3).unwrap();
/// let blurred = box_blur(&grid, 2);
/// assert!(blurred.iter().all(|&v| (v - 0.3).abs() < 1e-6));
/// ```
#[must_use]
pub fn box_blur(grid: &IntensityGrid, radius: usize) -> Vec<f32> {
    let (width, height) = (grid.width(), grid.height());
    let src = grid.as_slice();

    // Passe horizontale
    let mut horizontal = vec![0.0f32; src.len()];
    horizontal
        .par_chunks_mut(width)
        .zip(src.par_chunks(width))
        .for_each(|(out, row)| {
            for (x, slot) in out.iter_mut().enumerate() {
                let lo = x.saturating_sub(radius);
                let hi = (x + radius).min(width - 1);
                let sum: f32 = row[lo..=hi].iter().sum();
                *slot = sum / (hi - lo + 1) as f32;
            }
        });

    // Passe verticale
    let mut out = vec![0.0f32; src.len()];
    out.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let lo = y.saturating_sub(radius);
        let hi = (y + radius).min(height - 1);
        let n = (hi - lo + 1) as f32;
        for (x, slot) in row.iter_mut().enumerate() {
            let sum: f32 = (lo..=hi).map(|yy| horizontal[yy * width + x]).sum();
            *slot = sum / n;
        }
    });
    out
}

/// Unsharp mask. `amount == 0` returns an unchanged copy.
///
/// # Errors
/// `InvalidParameter` for a negative or non-finite `amount` or a zero radius.
///
/// # Example
/// ```
/// use sf_core::grid::IntensityGrid;
/// use sf_halftone::prefilter::sharpen;
/// let grid = IntensityGrid::from_vec(3, 1, vec![0.2, 0.8, 0.2]).unwrap();
/// let sharp = sharpen(&grid, 1.0, 1).unwrap();
/// assert!(sharp.as_slice()[1] > 0.8);
/// ```
pub fn sharpen(grid: &IntensityGrid, amount: f32, radius: usize) -> Result<IntensityGrid, HalftoneError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(HalftoneError::invalid("sharpen_amount", &amount, ">= 0.0"));
    }
    if radius == 0 {
        return Err(HalftoneError::invalid("sharpen_radius", &radius, ">= 1"));
    }
    if amount == 0.0 {
        return Ok(grid.clone());
    }
    let blurred = box_blur(grid, radius);
    let data: Vec<f32> = grid
        .as_slice()
        .par_iter()
        .zip(blurred.par_iter())
        .map(|(&v, &b)| (v + amount * (v - b)).clamp(0.0, 1.0))
        .collect();
    log::debug!("Unsharp mask : amount={amount}, rayon={radius}");
    IntensityGrid::from_vec(grid.width(), grid.height(), data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_grid_is_unchanged() -> Result<(), HalftoneError> {
        let grid = IntensityGrid::filled(6, 6, 0.4)?;
        let sharp = sharpen(&grid, 2.0, 2)?;
        assert!(sharp.as_slice().iter().all(|&v| (v - 0.4).abs() < 1e-5));
        Ok(())
    }

    #[test]
    fn step_edge_gains_contrast() -> Result<(), HalftoneError> {
        let data = (0..8 * 4).map(|i| if i % 8 < 4 { 0.3 } else { 0.7 }).collect();
        let grid = IntensityGrid::from_vec(8, 4, data)?;
        let sharp = sharpen(&grid, 1.5, 1)?;
        assert!(sharp.as_slice()[3] < 0.3);
        assert!(sharp.as_slice()[4] > 0.7);
        Ok(())
    }

    #[test]
    fn output_stays_in_range() -> Result<(), HalftoneError> {
        let grid = IntensityGrid::from_vec(3, 3, vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0])?;
        let sharp = sharpen(&grid, 4.0, 1)?;
        assert!(sharp.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
        Ok(())
    }

    #[test]
    fn bad_parameters_are_rejected() -> Result<(), HalftoneError> {
        let grid = IntensityGrid::filled(2, 2, 0.5)?;
        assert!(sharpen(&grid, -1.0, 1).is_err());
        assert!(sharpen(&grid, f32::NAN, 1).is_err());
        assert!(sharpen(&grid, 1.0, 0).is_err());
        Ok(())
    }
}
