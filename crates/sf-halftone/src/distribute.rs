//! Placement des points d'encre dans un cluster.
//!
//! Each policy is a pure function of `(len, k, offset)`, so clusters can be
//! decided independently and in any order.

use sf_core::config::DistributionKind;
use sf_core::error::HalftoneError;
use sf_core::grid::Coord;

/// Number of inked members for a cluster of `len` pixels with mean `target`.
///
/// `k = floor(target * len + 0.5)`: round-half-up, evaluated in `f64`.
///
/// # Errors
/// `InvalidParameter` when `target` is not in [0, 1]. Out-of-range targets
/// are never clamped.
///
/// # Example
/// ```
/// use sf_halftone::distribute::ink_count;
/// assert_eq!(ink_count(0.5, 4).unwrap(), 2);
/// assert_eq!(ink_count(0.625, 4).unwrap(), 3);
/// assert!(ink_count(1.2, 4).is_err());
/// ```
pub fn ink_count(target: f32, len: usize) -> Result<usize, HalftoneError> {
    if !(0.0..=1.0).contains(&target) {
        return Err(HalftoneError::invalid("target", &target, "[0.0, 1.0]"));
    }
    let k = (f64::from(target) * len as f64 + 0.5).floor() as usize;
    check_count(k, len)?;
    Ok(k)
}

fn check_count(k: usize, len: usize) -> Result<(), HalftoneError> {
    if k > len {
        return Err(HalftoneError::InvalidParameter {
            name: "ink_count",
            value: format!("{k} pour {len} pixels"),
            expected: "0 <= k <= cluster length",
        });
    }
    Ok(())
}

/// Ink budget carried from cluster to cluster along the curve.
///
/// The rounding residual of each cluster is added to the next one before
/// rounding. The residual stays in [-0.5, 0.5), which keeps `k` within
/// `[0, len]` and within one pixel of `target * len`.
///
/// # Example
/// ```
/// use sf_halftone::distribute::ErrorCarry;
/// let mut carry = ErrorCarry::new();
/// // 0.3 * 4 = 1.2 → 1, puis 1.2 + 0.2 = 1.4 → 1, puis 1.6 → 2
/// let ks: Vec<usize> = (0..3).map(|_| carry.ink_count(0.3, 4).unwrap()).collect();
/// assert_eq!(ks, [1, 1, 2]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ErrorCarry {
    residual: f64,
}

impl ErrorCarry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending residual, in pixels.
    #[must_use]
    pub fn residual(&self) -> f64 {
        self.residual
    }

    /// Ink count for the next cluster along the curve.
    ///
    /// # Errors
    /// `InvalidParameter` when `target` is not in [0, 1].
    pub fn ink_count(&mut self, target: f32, len: usize) -> Result<usize, HalftoneError> {
        if !(0.0..=1.0).contains(&target) {
            return Err(HalftoneError::invalid("target", &target, "[0.0, 1.0]"));
        }
        let wanted = f64::from(target) * len as f64 + self.residual;
        let k = (wanted + 0.5).floor().max(0.0) as usize;
        check_count(k, len)?;
        self.residual = wanted - k as f64;
        Ok(k)
    }
}

/// Whether member `offset` of a cluster of `len` members is inked when `k`
/// members receive ink.
///
/// # Example
/// ```
/// use sf_core::config::DistributionKind;
/// use sf_halftone::distribute::is_inked;
/// let picks: Vec<usize> = (0..4).filter(|&i| is_inked(DistributionKind::Centered, 4, 2, i)).collect();
/// assert_eq!(picks, [1, 2]);
/// ```
#[inline(always)]
#[must_use]
pub fn is_inked(kind: DistributionKind, len: usize, k: usize, offset: usize) -> bool {
    debug_assert!(k <= len && offset < len);
    match kind {
        DistributionKind::SequentialFirst => offset < k,
        DistributionKind::SequentialLast => offset >= len - k,
        DistributionKind::Centered => {
            let start = (len - k) / 2;
            (start..start + k).contains(&offset)
        }
        DistributionKind::Balanced => {
            // Bresenham avec une phase d'un demi-pas : exactement k marches sur len.
            // u128 : offset * k dépasse usize pour des clusters de 2^32 membres.
            let (offset, k, len) = (offset as u128, k as u128, len as u128);
            let phase = len / 2;
            (offset * k + k + phase) / len > (offset * k + phase) / len
        }
    }
}

/// Write the ink decision of every member of one cluster into `flags`.
///
/// # Errors
/// `InvalidParameter` when `k > flags.len()`.
pub fn fill_flags(kind: DistributionKind, k: usize, flags: &mut [bool]) -> Result<(), HalftoneError> {
    let len = flags.len();
    check_count(k, len)?;
    for (offset, flag) in flags.iter_mut().enumerate() {
        *flag = is_inked(kind, len, k, offset);
    }
    Ok(())
}

/// Dot pattern of a cluster: the members that receive ink, in curve order.
///
/// # Errors
/// `InvalidParameter` when `k > members.len()`.
///
/// # Example
/// ```
/// use sf_core::config::DistributionKind;
/// use sf_core::grid::Coord;
/// use sf_halftone::distribute::distribute;
/// let members: Vec<Coord> = (0..4).map(|c| Coord::new(0, c)).collect();
/// let dots = distribute(DistributionKind::SequentialLast, &members, 1).unwrap();
/// assert_eq!(dots, [Coord::new(0, 3)]);
/// ```
pub fn distribute(
    kind: DistributionKind,
    members: &[Coord],
    k: usize,
) -> Result<Vec<Coord>, HalftoneError> {
    let len = members.len();
    check_count(k, len)?;
    Ok(members
        .iter()
        .enumerate()
        .filter(|&(offset, _)| is_inked(kind, len, k, offset))
        .map(|(_, &c)| c)
        .collect())
}
