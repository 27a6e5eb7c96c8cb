//! Hilbert curve on the enclosing 2^n square, clipped to the grid.
//!
//! Every run of 4^l consecutive indices starting at a multiple of 4^l covers
//! one aligned 2^l × 2^l block. The generator walks those blocks as a quadtree
//! and prunes any block whose origin lies outside the grid, so padding cells
//! are never materialised.

use sf_core::grid::Coord;

/// Rotate/flip a quadrant for the Hilbert transformation.
#[inline(always)]
fn rot(s: u64, x: &mut u64, y: &mut u64, rx: u64, ry: u64) {
    if ry == 0 {
        if rx == 1 {
            *x = s - 1 - *x;
            *y = s - 1 - *y;
        }
        std::mem::swap(x, y);
    }
}

/// Convert distance along the Hilbert curve of side `2^order` to (x, y).
///
/// # Example
/// ```
/// use sf_curve::hilbert::d2xy;
/// assert_eq!(d2xy(1, 0), (0, 0));
/// assert_eq!(d2xy(1, 1), (0, 1));
/// assert_eq!(d2xy(1, 2), (1, 1));
/// assert_eq!(d2xy(1, 3), (1, 0));
/// ```
#[inline]
#[must_use]
pub fn d2xy(order: u32, d: u64) -> (u64, u64) {
    let n = 1u64 << order;
    let mut x = 0u64;
    let mut y = 0u64;
    let mut s = 1u64;
    let mut t = d;

    while s < n {
        let rx = 1 & (t / 2);
        let ry = 1 & (t ^ rx);

        rot(s, &mut x, &mut y, rx, ry);

        x += s * rx;
        y += s * ry;
        t /= 4;
        s *= 2;
    }

    (x, y)
}

/// Smallest order whose square covers `side` cells.
#[inline]
#[must_use]
pub fn order_for(side: usize) -> u32 {
    side.max(1).next_power_of_two().trailing_zeros()
}

/// Append the clipped Hilbert order of a `height × width` grid to `out`.
pub fn hilbert_order(height: usize, width: usize, out: &mut Vec<Coord>) {
    let order = order_for(height.max(width));
    out.reserve(height * width);
    visit(order, 0, order, height as u64, width as u64, out);
}

fn visit(order: u32, d0: u64, level: u32, height: u64, width: u64, out: &mut Vec<Coord>) {
    let side = 1u64 << level;
    let (x, y) = d2xy(order, d0);
    let origin_x = x & !(side - 1);
    let origin_y = y & !(side - 1);
    if origin_x >= width || origin_y >= height {
        return;
    }
    if level == 0 {
        out.push(Coord::new(y as usize, x as usize));
        return;
    }
    let quarter = 1u64 << (2 * (level - 1));
    for q in 0..4 {
        visit(order, d0 + q * quarter, level - 1, height, width, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manhattan(a: Coord, b: Coord) -> usize {
        a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
    }

    #[test]
    fn full_square_is_continuous() {
        let mut out = Vec::new();
        hilbert_order(8, 8, &mut out);
        assert_eq!(out.len(), 64);
        assert!(out.windows(2).all(|w| manhattan(w[0], w[1]) == 1));
    }

    #[test]
    fn clipped_order_matches_filtered_square() {
        // Même résultat que filtrer la courbe complète du carré englobant.
        let (height, width) = (5, 3);
        let order = order_for(5);
        let n = 1u64 << order;
        let filtered: Vec<Coord> = (0..n * n)
            .map(|d| d2xy(order, d))
            .filter(|&(x, y)| x < width && y < height)
            .map(|(x, y)| Coord::new(y as usize, x as usize))
            .collect();
        let mut out = Vec::new();
        hilbert_order(5, 3, &mut out);
        assert_eq!(out, filtered);
    }

    #[test]
    fn order_for_rounds_up() {
        assert_eq!(order_for(1), 0);
        assert_eq!(order_for(4), 2);
        assert_eq!(order_for(5), 3);
    }
}
