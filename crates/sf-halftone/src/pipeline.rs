use rayon::prelude::*;
use sf_core::config::{HalftoneConfig, HalftoneParams};
use sf_core::error::HalftoneError;
use sf_core::grid::{Bitmap, IntensityGrid};
use sf_curve::CurveOrder;

use crate::aggregate::cluster_targets;
use crate::assemble::{assemble, verify_coverage};
use crate::cluster::Partition;
use crate::distribute::{ErrorCarry, fill_flags, ink_count};

/// Bilan d'un passage : nombre de clusters et fidélité tonale.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HalftoneStats {
    /// Number of clusters.
    pub clusters: usize,
    /// Inked pixels in the output.
    pub ink_pixels: usize,
    /// Sum over clusters of `target * len`, the ideal ink count.
    pub ink_budget: f64,
    /// Largest `|k - target * len|` over all clusters.
    pub max_cluster_error: f64,
}

/// Orchestre courbe → clusters → cibles → motifs → bitmap.
///
/// The curve order is cached and only regenerated when the grid shape or the
/// curve kind changes.
///
/// # Example
/// ```
/// use sf_core::config::HalftoneConfig;
/// use sf_core::grid::IntensityGrid;
/// use sf_halftone::Halftoner;
///
/// let mut halftoner = Halftoner::from_config(&HalftoneConfig::default()).unwrap();
/// let grid = IntensityGrid::filled(8, 8, 0.5).unwrap();
/// let bitmap = halftoner.process(&grid).unwrap();
/// assert_eq!(bitmap.ink_count(), 32);
/// ```
pub struct Halftoner {
    params: HalftoneParams,
    order: Option<CurveOrder>,
}

impl Halftoner {
    #[must_use]
    pub fn new(params: HalftoneParams) -> Self {
        Self {
            params,
            order: None,
        }
    }

    /// # Errors
    /// `InvalidParameter` when the configuration's core parameters are invalid.
    pub fn from_config(config: &HalftoneConfig) -> Result<Self, HalftoneError> {
        Ok(Self::new(config.params()?))
    }

    #[must_use]
    pub fn params(&self) -> &HalftoneParams {
        &self.params
    }

    /// Cached curve order for the given shape, regenerated on change.
    ///
    /// # Errors
    /// Propagates curve generation and verification errors.
    pub fn curve_order(&mut self, height: usize, width: usize) -> Result<&CurveOrder, HalftoneError> {
        let stale = self
            .order
            .as_ref()
            .is_none_or(|o| !o.fits(height, width) || o.kind() != self.params.curve);
        if stale {
            let order = CurveOrder::generate(self.params.curve, height, width)?;
            if self.params.verify {
                order.verify_permutation()?;
            }
            self.order = Some(order);
        }
        self.order.as_ref().ok_or_else(|| {
            HalftoneError::InternalInvariantViolation("ordre de courbe absent du cache".into())
        })
    }

    /// Halftone `grid` into a bitmap of the same shape.
    ///
    /// # Errors
    /// See [`Halftoner::process_with_stats`].
    pub fn process(&mut self, grid: &IntensityGrid) -> Result<Bitmap, HalftoneError> {
        self.process_with_stats(grid).map(|(bitmap, _)| bitmap)
    }

    /// Halftone `grid` and report tone-fidelity statistics.
    ///
    /// # Errors
    /// `InvalidParameter` for bad parameters or out-of-range targets,
    /// `InternalInvariantViolation` when verification is enabled and the
    /// curve or the partition is broken.
    pub fn process_with_stats(
        &mut self,
        grid: &IntensityGrid,
    ) -> Result<(Bitmap, HalftoneStats), HalftoneError> {
        let params = self.params;
        let order = self.curve_order(grid.height(), grid.width())?;
        let partition = Partition::new(order.len(), params.cluster_size)?;
        if params.verify {
            verify_coverage(order, &partition)?;
        }

        // 1. Cibles par cluster (parallèle)
        let targets = cluster_targets(grid, order, &partition)?;

        // 2. Nombre de points d'encre
        let counts: Vec<usize> = if params.carry_error {
            let mut carry = ErrorCarry::new();
            let counts = targets
                .iter()
                .enumerate()
                .map(|(i, &t)| carry.ink_count(t, partition.cluster_len(i)))
                .collect::<Result<_, _>>()?;
            log::trace!("Résidu d'encre en fin de courbe : {:.3}", carry.residual());
            counts
        } else {
            targets
                .par_iter()
                .enumerate()
                .map(|(i, &t)| ink_count(t, partition.cluster_len(i)))
                .collect::<Result<_, _>>()?
        };

        // 3. Motifs : chaque cluster possède sa tranche de drapeaux
        let mut flags = vec![false; order.len()];
        flags
            .par_chunks_mut(params.cluster_size)
            .zip(counts.par_iter())
            .try_for_each(|(chunk, &k)| fill_flags(params.distribution, k, chunk))?;

        // 4. Assemblage
        let bitmap = assemble(order, &flags)?;

        let stats = stats(&partition, &targets, &counts, &bitmap);
        let expected_ink: usize = counts.iter().sum();
        if params.verify && stats.ink_pixels != expected_ink {
            return Err(HalftoneError::InternalInvariantViolation(format!(
                "{} pixels encrés pour {expected_ink} décidés",
                stats.ink_pixels
            )));
        }
        log::debug!(
            "Tramage {}×{} ({}, s={}, {}) : {} clusters, encre {} / budget {:.1}, écart max {:.3}",
            grid.height(),
            grid.width(),
            params.curve,
            params.cluster_size,
            params.distribution,
            stats.clusters,
            stats.ink_pixels,
            stats.ink_budget,
            stats.max_cluster_error
        );
        Ok((bitmap, stats))
    }
}

fn stats(partition: &Partition, targets: &[f32], counts: &[usize], bitmap: &Bitmap) -> HalftoneStats {
    let mut ink_budget = 0.0f64;
    let mut max_cluster_error = 0.0f64;
    for (i, (&t, &k)) in targets.iter().zip(counts).enumerate() {
        let ideal = f64::from(t) * partition.cluster_len(i) as f64;
        ink_budget += ideal;
        max_cluster_error = max_cluster_error.max((k as f64 - ideal).abs());
    }
    HalftoneStats {
        clusters: partition.len(),
        ink_pixels: bitmap.ink_count(),
        ink_budget,
        max_cluster_error,
    }
}

/// One-shot halftoning without order caching.
///
/// # Errors
/// See [`Halftoner::process_with_stats`].
pub fn halftone(grid: &IntensityGrid, params: HalftoneParams) -> Result<Bitmap, HalftoneError> {
    Halftoner::new(params).process(grid)
}
