use crate::error::HalftoneError;

/// Position d'une cellule dans la grille : ligne puis colonne.
///
/// # Example
/// ```
/// use sf_core::grid::Coord;
/// let c = Coord::new(2, 5);
/// assert_eq!((c.row, c.col), (2, 5));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Row index, `0 <= row < height`.
    pub row: usize,
    /// Column index, `0 <= col < width`.
    pub col: usize,
}

impl Coord {
    #[inline(always)]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

fn check_dims(width: usize, height: usize) -> Result<(), HalftoneError> {
    if width == 0 {
        return Err(HalftoneError::invalid("width", &width, ">= 1"));
    }
    if height == 0 {
        return Err(HalftoneError::invalid("height", &height, ">= 1"));
    }
    Ok(())
}

/// Grille d'intensité normalisée [0.0, 1.0], row-major.
///
/// 0.0 is paper white, 1.0 is full ink. Dimensions are fixed at construction
/// and every value is guaranteed finite and in range.
///
/// # Example
/// ```
/// use sf_core::grid::{Coord, IntensityGrid};
/// let grid = IntensityGrid::filled(3, 2, 0.25).unwrap();
/// assert_eq!(grid.get(Coord::new(1, 2)), 0.25);
/// assert_eq!(grid.len(), 6);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct IntensityGrid {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl IntensityGrid {
    /// Build a grid from row-major values.
    ///
    /// # Errors
    /// `InvalidParameter` for a zero dimension or a value outside [0, 1],
    /// `DimensionMismatch` when `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Result<Self, HalftoneError> {
        check_dims(width, height)?;
        let expected = width * height;
        if data.len() != expected {
            return Err(HalftoneError::DimensionMismatch {
                context: "intensity grid",
                expected: format!("{expected} valeurs ({width}×{height})"),
                found: format!("{} valeurs", data.len()),
            });
        }
        if let Some((idx, v)) = data
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(HalftoneError::InvalidParameter {
                name: "intensity",
                value: format!("{v} à l'index {idx}"),
                expected: "[0.0, 1.0]",
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Uniform grid, handy for tests and calibration patches.
    ///
    /// # Errors
    /// Same as [`IntensityGrid::from_vec`].
    pub fn filled(width: usize, height: usize, value: f32) -> Result<Self, HalftoneError> {
        Self::from_vec(width, height, vec![value; width * height])
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Never true for a constructed grid; provided for API symmetry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Intensity at `c`.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, c: Coord) -> f32 {
        debug_assert!(c.row < self.height && c.col < self.width, "coord out of bounds");
        self.data[c.row * self.width + c.col]
    }

    /// Row-major values.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Mean intensity of the whole grid, the image's ink budget per cell.
    #[must_use]
    pub fn mean(&self) -> f64 {
        let sum: f64 = self.data.iter().map(|&v| f64::from(v)).sum();
        sum / self.data.len() as f64
    }
}

/// Sortie binaire H×W : `true` = encre, `false` = papier.
///
/// # Example
/// ```
/// use sf_core::grid::{Bitmap, Coord};
/// let mut bm = Bitmap::new(4, 4).unwrap();
/// bm.set(Coord::new(1, 1), true);
/// assert!(bm.is_ink(Coord::new(1, 1)));
/// assert_eq!(bm.ink_count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    ink: Vec<bool>,
    width: usize,
    height: usize,
}

impl Bitmap {
    /// All-paper bitmap.
    ///
    /// # Errors
    /// `InvalidParameter` for a zero dimension.
    pub fn new(width: usize, height: usize) -> Result<Self, HalftoneError> {
        check_dims(width, height)?;
        Ok(Self {
            ink: vec![false; width * height],
            width,
            height,
        })
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn set(&mut self, c: Coord, ink: bool) {
        self.ink[c.row * self.width + c.col] = ink;
    }

    #[inline(always)]
    #[must_use]
    pub fn is_ink(&self, c: Coord) -> bool {
        self.ink[c.row * self.width + c.col]
    }

    /// Total inked cells.
    #[must_use]
    pub fn ink_count(&self) -> usize {
        self.ink.iter().filter(|&&b| b).count()
    }

    /// Row-major ink flags.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.ink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_rejects_wrong_length() {
        assert!(matches!(
            IntensityGrid::from_vec(3, 5, vec![0.0; 14]),
            Err(HalftoneError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn from_vec_rejects_out_of_range_and_nan() {
        assert!(matches!(
            IntensityGrid::from_vec(2, 1, vec![0.5, 1.5]),
            Err(HalftoneError::InvalidParameter {
                name: "intensity",
                ..
            })
        ));
        assert!(IntensityGrid::from_vec(1, 1, vec![f32::NAN]).is_err());
        assert!(IntensityGrid::from_vec(1, 1, vec![-0.01]).is_err());
    }

    #[test]
    fn zero_dimension_is_invalid() {
        assert!(IntensityGrid::from_vec(0, 3, Vec::new()).is_err());
        assert!(Bitmap::new(4, 0).is_err());
    }

    #[test]
    fn grid_is_row_major() -> Result<(), HalftoneError> {
        let grid = IntensityGrid::from_vec(3, 2, vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5])?;
        assert!((grid.get(Coord::new(1, 0)) - 0.3).abs() < f32::EPSILON);
        assert!((grid.get(Coord::new(0, 2)) - 0.2).abs() < f32::EPSILON);
        Ok(())
    }

    #[test]
    fn mean_of_uniform_grid() -> Result<(), HalftoneError> {
        let grid = IntensityGrid::filled(7, 3, 0.5)?;
        assert!((grid.mean() - 0.5).abs() < 1e-9);
        Ok(())
    }
}
