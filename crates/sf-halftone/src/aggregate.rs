use rayon::prelude::*;
use sf_core::error::HalftoneError;
use sf_core::grid::{Coord, IntensityGrid};
use sf_curve::CurveOrder;

use crate::cluster::Partition;

/// Mean intensity of a cluster's members.
///
/// Summed and divided in `f32`, the grid's native precision, with IEEE
/// round-to-nearest. Each partial sum is bounded by the member count, so the
/// mean of values in [0, 1] stays in [0, 1].
///
/// # Example
/// ```
/// use sf_core::grid::{Coord, IntensityGrid};
/// use sf_halftone::aggregate::cluster_mean;
/// let grid = IntensityGrid::from_vec(2, 1, vec![0.25, 0.75]).unwrap();
/// let mean = cluster_mean(&grid, &[Coord::new(0, 0), Coord::new(0, 1)]);
/// assert_eq!(mean, 0.5);
/// ```
#[must_use]
pub fn cluster_mean(grid: &IntensityGrid, members: &[Coord]) -> f32 {
    debug_assert!(!members.is_empty(), "empty cluster");
    let sum: f32 = members.iter().map(|&c| grid.get(c)).sum();
    sum / members.len() as f32
}

/// Per-cluster targets, in cluster order. Clusters are measured in parallel.
///
/// # Errors
/// `DimensionMismatch` when the grid and the curve order disagree on shape.
pub fn cluster_targets(
    grid: &IntensityGrid,
    order: &CurveOrder,
    partition: &Partition,
) -> Result<Vec<f32>, HalftoneError> {
    if !order.fits(grid.height(), grid.width()) {
        return Err(HalftoneError::DimensionMismatch {
            context: "intensity grid vs curve order",
            expected: format!("{}×{}", order.height(), order.width()),
            found: format!("{}×{}", grid.height(), grid.width()),
        });
    }
    Ok(order
        .as_slice()
        .par_chunks(partition.cluster_size())
        .map(|members| cluster_mean(grid, members))
        .collect())
}
