//! Space-filling visitation orders for raster grids.
//!
//! [`CurveOrder::generate`] produces a permutation of every cell of an
//! `height × width` grid, following the selected [`CurveKind`].

pub mod gilbert;
pub mod hilbert;
pub mod peano;
pub mod serpentine;

use sf_core::config::CurveKind;
use sf_core::error::HalftoneError;
use sf_core::grid::Coord;

/// Largest accepted side, keeps Hilbert indices inside `u64`.
pub const MAX_SIDE: usize = 1 << 24;

/// Ordre de visite immuable de toutes les cellules d'une grille.
///
/// # Example
/// ```
/// use sf_core::config::CurveKind;
/// use sf_curve::CurveOrder;
/// let order = CurveOrder::generate(CurveKind::Hilbert, 5, 3).unwrap();
/// assert_eq!(order.len(), 15);
/// assert!(order.verify_permutation().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveOrder {
    coords: Vec<Coord>,
    height: usize,
    width: usize,
    kind: CurveKind,
}

impl CurveOrder {
    /// Generate the visitation order of a `height × width` grid.
    ///
    /// Grids with a single row or column always get the straight scan.
    ///
    /// # Errors
    /// `InvalidParameter` for a zero or oversized dimension.
    pub fn generate(kind: CurveKind, height: usize, width: usize) -> Result<Self, HalftoneError> {
        if height == 0 || height > MAX_SIDE {
            return Err(HalftoneError::invalid("height", &height, "[1, 2^24]"));
        }
        if width == 0 || width > MAX_SIDE {
            return Err(HalftoneError::invalid("width", &width, "[1, 2^24]"));
        }

        let mut coords = Vec::new();
        if height == 1 || width == 1 {
            serpentine::serpentine_order(height, width, &mut coords);
        } else {
            match kind {
                CurveKind::Serpentine => serpentine::serpentine_order(height, width, &mut coords),
                CurveKind::Hilbert => hilbert::hilbert_order(height, width, &mut coords),
                CurveKind::Peano => peano::peano_order(height, width, &mut coords),
                CurveKind::Gilbert => gilbert::gilbert_order(height, width, &mut coords),
            }
        }
        log::debug!("Courbe {kind} générée : {height}×{width}, {} cellules", coords.len());

        Ok(Self {
            coords,
            height,
            width,
            kind,
        })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Coord] {
        &self.coords
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// True when the order was built for a grid of this shape.
    #[inline]
    #[must_use]
    pub fn fits(&self, height: usize, width: usize) -> bool {
        self.height == height && self.width == width
    }

    /// Check that the order visits every cell exactly once.
    ///
    /// # Errors
    /// `InternalInvariantViolation` naming the first out-of-bounds, duplicated
    /// or missing cell.
    pub fn verify_permutation(&self) -> Result<(), HalftoneError> {
        let cells = self.height * self.width;
        let mut seen = vec![false; cells];
        for (idx, c) in self.coords.iter().enumerate() {
            if c.row >= self.height || c.col >= self.width {
                return Err(HalftoneError::InternalInvariantViolation(format!(
                    "courbe {} : ({}, {}) hors grille à l'index {idx}",
                    self.kind, c.row, c.col
                )));
            }
            let cell = &mut seen[c.row * self.width + c.col];
            if *cell {
                return Err(HalftoneError::InternalInvariantViolation(format!(
                    "courbe {} : ({}, {}) visitée deux fois (index {idx})",
                    self.kind, c.row, c.col
                )));
            }
            *cell = true;
        }
        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(HalftoneError::InternalInvariantViolation(format!(
                "courbe {} : ({}, {}) jamais visitée",
                self.kind,
                missing / self.width,
                missing % self.width
            )));
        }
        Ok(())
    }

    /// Curve index of every cell, row-major.
    #[must_use]
    pub fn rank_map(&self) -> Vec<usize> {
        let mut ranks = vec![0usize; self.height * self.width];
        for (idx, c) in self.coords.iter().enumerate() {
            ranks[c.row * self.width + c.col] = idx;
        }
        ranks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPES: [(usize, usize); 12] = [
        (1, 1),
        (1, 7),
        (7, 1),
        (2, 2),
        (4, 4),
        (5, 3),
        (3, 5),
        (8, 8),
        (9, 9),
        (10, 27),
        (17, 6),
        (31, 33),
    ];

    #[test]
    fn every_curve_is_a_bijection() -> Result<(), HalftoneError> {
        for kind in CurveKind::ALL {
            for (h, w) in SHAPES {
                let order = CurveOrder::generate(kind, h, w)?;
                assert_eq!(order.len(), h * w, "{kind} {h}×{w}");
                order.verify_permutation()?;
            }
        }
        Ok(())
    }

    #[test]
    fn generation_is_deterministic() -> Result<(), HalftoneError> {
        for kind in CurveKind::ALL {
            let a = CurveOrder::generate(kind, 19, 23)?;
            let b = CurveOrder::generate(kind, 19, 23)?;
            assert_eq!(a, b);
        }
        Ok(())
    }

    #[test]
    fn degenerate_grids_are_straight_scans() -> Result<(), HalftoneError> {
        for kind in CurveKind::ALL {
            let row = CurveOrder::generate(kind, 1, 6)?;
            assert!(row.as_slice().iter().enumerate().all(|(i, c)| c.row == 0 && c.col == i));
            let col = CurveOrder::generate(kind, 6, 1)?;
            assert!(col.as_slice().iter().enumerate().all(|(i, c)| c.row == i && c.col == 0));
        }
        Ok(())
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(matches!(
            CurveOrder::generate(CurveKind::Peano, 0, 4),
            Err(HalftoneError::InvalidParameter { name: "height", .. })
        ));
    }

    #[test]
    fn verify_detects_duplicate() {
        let order = CurveOrder {
            coords: vec![Coord::new(0, 0), Coord::new(0, 0)],
            height: 1,
            width: 2,
            kind: CurveKind::Serpentine,
        };
        assert!(matches!(
            order.verify_permutation(),
            Err(HalftoneError::InternalInvariantViolation(_))
        ));
    }

    #[test]
    fn rank_map_inverts_order() -> Result<(), HalftoneError> {
        let order = CurveOrder::generate(CurveKind::Gilbert, 6, 9)?;
        let ranks = order.rank_map();
        for (idx, c) in order.as_slice().iter().enumerate() {
            assert_eq!(ranks[c.row * 9 + c.col], idx);
        }
        Ok(())
    }
}
