use sf_core::grid::Coord;

/// Boustrophedon scan: even rows left→right, odd rows right→left.
///
/// Also the straight scan used for single-row and single-column grids.
///
/// # Example
/// ```
/// use sf_core::grid::Coord;
/// use sf_curve::serpentine::serpentine_order;
/// let mut out = Vec::new();
/// serpentine_order(2, 3, &mut out);
/// assert_eq!(out[3], Coord::new(1, 2));
/// ```
pub fn serpentine_order(height: usize, width: usize, out: &mut Vec<Coord>) {
    out.reserve(height * width);
    for row in 0..height {
        if row % 2 == 0 {
            out.extend((0..width).map(|col| Coord::new(row, col)));
        } else {
            out.extend((0..width).rev().map(|col| Coord::new(row, col)));
        }
    }
}
