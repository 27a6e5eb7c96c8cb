use std::ops::Range;

use sf_core::error::HalftoneError;
use sf_core::grid::Coord;

/// Découpage d'un ordre de courbe en clusters contigus.
///
/// A cluster is an index range into the flat curve-order buffer, never a
/// separate allocation. Ranges are disjoint and cover `0..total`.
///
/// # Example
/// ```
/// use sf_halftone::cluster::Partition;
/// let p = Partition::new(15, 4).unwrap();
/// assert_eq!(p.len(), 4);
/// assert_eq!(p.range(3), 12..15);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    total: usize,
    cluster_size: usize,
}

impl Partition {
    /// # Errors
    /// `InvalidParameter` when `cluster_size == 0`.
    pub fn new(total: usize, cluster_size: usize) -> Result<Self, HalftoneError> {
        if cluster_size == 0 {
            return Err(HalftoneError::invalid("cluster_size", &cluster_size, ">= 1"));
        }
        Ok(Self {
            total,
            cluster_size,
        })
    }

    /// Number of clusters, `ceil(total / cluster_size)`.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.total.div_ceil(self.cluster_size)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    #[inline]
    #[must_use]
    pub fn cluster_size(&self) -> usize {
        self.cluster_size
    }

    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Index range of cluster `idx` in the curve order.
    #[inline]
    #[must_use]
    pub fn range(&self, idx: usize) -> Range<usize> {
        debug_assert!(idx < self.len(), "cluster index out of range");
        let start = idx * self.cluster_size;
        start..(start + self.cluster_size).min(self.total)
    }

    /// Member count of cluster `idx`. Only the last cluster can be short.
    #[inline]
    #[must_use]
    pub fn cluster_len(&self, idx: usize) -> usize {
        self.range(idx).len()
    }

    /// Member slices of every cluster, in curve order.
    pub fn clusters<'a>(&self, order: &'a [Coord]) -> std::slice::Chunks<'a, Coord> {
        debug_assert_eq!(order.len(), self.total);
        order.chunks(self.cluster_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_lands_in_last_cluster() -> Result<(), HalftoneError> {
        let p = Partition::new(15, 4)?;
        let lens: Vec<usize> = (0..p.len()).map(|i| p.cluster_len(i)).collect();
        assert_eq!(lens, [4, 4, 4, 3]);
        Ok(())
    }

    #[test]
    fn exact_multiple_has_full_last_cluster() -> Result<(), HalftoneError> {
        let p = Partition::new(16, 4)?;
        assert_eq!(p.len(), 4);
        assert_eq!(p.cluster_len(3), 4);
        Ok(())
    }

    #[test]
    fn ranges_tile_the_order() -> Result<(), HalftoneError> {
        let p = Partition::new(101, 7)?;
        let mut next = 0;
        for r in (0..p.len()).map(|i| p.range(i)) {
            assert_eq!(r.start, next);
            next = r.end;
        }
        assert_eq!(next, 101);
        Ok(())
    }

    #[test]
    fn clusters_match_ranges() -> Result<(), HalftoneError> {
        let order: Vec<Coord> = (0..10).map(|i| Coord::new(0, i)).collect();
        let p = Partition::new(order.len(), 3)?;
        for (i, slice) in p.clusters(&order).enumerate() {
            assert_eq!(slice, &order[p.range(i)]);
        }
        Ok(())
    }

    #[test]
    fn non_positive_size_is_invalid() {
        assert!(matches!(
            Partition::new(10, 0),
            Err(HalftoneError::InvalidParameter {
                name: "cluster_size",
                ..
            })
        ));
        assert!(Partition::new(10, 5).is_ok());
    }

    #[test]
    fn cluster_larger_than_order() -> Result<(), HalftoneError> {
        let p = Partition::new(3, 8)?;
        assert_eq!(p.len(), 1);
        assert_eq!(p.range(0), 0..3);
        Ok(())
    }
}
