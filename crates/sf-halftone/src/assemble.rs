use sf_core::error::HalftoneError;
use sf_core::grid::Bitmap;
use sf_curve::CurveOrder;

use crate::cluster::Partition;

/// Write per-member ink decisions back to a full-resolution bitmap.
///
/// `flags[i]` is the decision for `order[i]`; the clusters' dot patterns are
/// the contiguous runs of `flags` described by the partition. The bitmap
/// starts all paper and only inked cells are touched.
///
/// # Errors
/// `DimensionMismatch` when `flags` and `order` differ in length.
///
/// # Example
/// ```
/// use sf_core::config::CurveKind;
/// use sf_curve::CurveOrder;
/// use sf_halftone::assemble::assemble;
/// let order = CurveOrder::generate(CurveKind::Serpentine, 2, 2).unwrap();
/// let bm = assemble(&order, &[true, false, false, true]).unwrap();
/// assert_eq!(bm.ink_count(), 2);
/// ```
pub fn assemble(order: &CurveOrder, flags: &[bool]) -> Result<Bitmap, HalftoneError> {
    if flags.len() != order.len() {
        return Err(HalftoneError::DimensionMismatch {
            context: "ink flags vs curve order",
            expected: format!("{} décisions", order.len()),
            found: format!("{} décisions", flags.len()),
        });
    }
    let mut bitmap = Bitmap::new(order.width(), order.height())?;
    for (&c, _) in order.as_slice().iter().zip(flags).filter(|&(_, &ink)| ink) {
        bitmap.set(c, true);
    }
    Ok(bitmap)
}

/// How many clusters claim each cell, row-major.
#[must_use]
pub fn coverage(order: &CurveOrder, partition: &Partition) -> Vec<u32> {
    let width = order.width();
    let mut counts = vec![0u32; order.height() * width];
    for members in partition.clusters(order.as_slice()) {
        for c in members {
            counts[c.row * width + c.col] += 1;
        }
    }
    counts
}

/// Check that every cell belongs to exactly one cluster.
///
/// # Errors
/// `InternalInvariantViolation` naming the first gap or overlap.
pub fn verify_coverage(order: &CurveOrder, partition: &Partition) -> Result<(), HalftoneError> {
    if partition.total() != order.len() {
        return Err(HalftoneError::InternalInvariantViolation(format!(
            "partition de {} membres pour une courbe de {} cellules",
            partition.total(),
            order.len()
        )));
    }
    let width = order.width();
    let counts = coverage(order, partition);
    match counts.iter().position(|&n| n != 1) {
        None => Ok(()),
        Some(cell) => Err(HalftoneError::InternalInvariantViolation(format!(
            "cellule ({}, {}) couverte par {} clusters",
            cell / width,
            cell % width,
            counts[cell]
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::config::CurveKind;
    use sf_core::grid::Coord;

    #[test]
    fn every_cell_covered_once() -> Result<(), HalftoneError> {
        for kind in CurveKind::ALL {
            for (h, w, s) in [(4, 4, 4), (5, 3, 4), (9, 7, 5), (1, 13, 6), (12, 10, 64)] {
                let order = CurveOrder::generate(kind, h, w)?;
                let partition = Partition::new(order.len(), s)?;
                assert!(coverage(&order, &partition).iter().all(|&n| n == 1));
                verify_coverage(&order, &partition)?;
            }
        }
        Ok(())
    }

    #[test]
    fn assemble_places_ink_at_curve_coords() -> Result<(), HalftoneError> {
        let order = CurveOrder::generate(CurveKind::Serpentine, 2, 3)?;
        // serpentine: (0,0) (0,1) (0,2) (1,2) (1,1) (1,0)
        let flags = [false, false, false, true, false, false];
        let bm = assemble(&order, &flags)?;
        assert!(bm.is_ink(Coord::new(1, 2)));
        assert_eq!(bm.ink_count(), 1);
        Ok(())
    }

    #[test]
    fn flag_length_mismatch_is_reported() -> Result<(), HalftoneError> {
        let order = CurveOrder::generate(CurveKind::Hilbert, 4, 4)?;
        assert!(matches!(
            assemble(&order, &[true; 15]),
            Err(HalftoneError::DimensionMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn partition_size_mismatch_is_an_invariant_violation() -> Result<(), HalftoneError> {
        let order = CurveOrder::generate(CurveKind::Peano, 3, 3)?;
        let partition = Partition::new(8, 4)?;
        assert!(matches!(
            verify_coverage(&order, &partition),
            Err(HalftoneError::InternalInvariantViolation(_))
        ));
        Ok(())
    }
}
