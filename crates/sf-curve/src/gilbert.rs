//! Generalized Hilbert curve ("Gilbert") for arbitrary rectangles.
//!
//! Unlike the clipped curves, every step moves to a 4-neighbour except for
//! a single diagonal step that can appear when both sides are odd.

use sf_core::grid::Coord;

/// Append the Gilbert order of a `height × width` grid to `out`.
///
/// The major axis follows the longer side.
pub fn gilbert_order(height: usize, width: usize, out: &mut Vec<Coord>) {
    out.reserve(height * width);
    let (w, h) = (width as i64, height as i64);
    if w >= h {
        gilbert2d(0, 0, w, 0, 0, h, out);
    } else {
        gilbert2d(0, 0, 0, h, w, 0, out);
    }
}

/// Recursively fill the rectangle spanned from `(x, y)` by the major axis
/// `(ax, ay)` and the minor axis `(bx, by)`.
fn gilbert2d(x: i64, y: i64, ax: i64, ay: i64, bx: i64, by: i64, out: &mut Vec<Coord>) {
    let w = (ax + ay).abs();
    let h = (bx + by).abs();

    let (dax, day) = (ax.signum(), ay.signum());
    let (dbx, dby) = (bx.signum(), by.signum());

    if h == 1 {
        let (mut cx, mut cy) = (x, y);
        for _ in 0..w {
            out.push(Coord::new(cy as usize, cx as usize));
            cx += dax;
            cy += day;
        }
        return;
    }

    if w == 1 {
        let (mut cx, mut cy) = (x, y);
        for _ in 0..h {
            out.push(Coord::new(cy as usize, cx as usize));
            cx += dbx;
            cy += dby;
        }
        return;
    }

    let (mut ax2, mut ay2) = (ax / 2, ay / 2);
    let (mut bx2, mut by2) = (bx / 2, by / 2);

    let w2 = (ax2 + ay2).abs();
    let h2 = (bx2 + by2).abs();

    if 2 * w > 3 * h {
        // Rectangle allongé : découpe le long de l'axe majeur
        if w2 % 2 != 0 && w > 2 {
            ax2 += dax;
            ay2 += day;
        }
        gilbert2d(x, y, ax2, ay2, bx, by, out);
        gilbert2d(x + ax2, y + ay2, ax - ax2, ay - ay2, bx, by, out);
    } else {
        if h2 % 2 != 0 && h > 2 {
            bx2 += dbx;
            by2 += dby;
        }
        gilbert2d(x, y, bx2, by2, ax2, ay2, out);
        gilbert2d(x + bx2, y + by2, ax, ay, bx - bx2, by - by2, out);
        gilbert2d(
            x + (ax - dax) + (bx2 - dbx),
            y + (ay - day) + (by2 - dby),
            -bx2,
            -by2,
            -(ax - ax2),
            -(ay - ay2),
            out,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_rectangle_is_continuous() {
        let mut out = Vec::new();
        gilbert_order(8, 16, &mut out);
        assert_eq!(out.len(), 128);
        assert_eq!(out[0], Coord::new(0, 0));
        assert!(
            out.windows(2)
                .all(|w| w[0].row.abs_diff(w[1].row) + w[0].col.abs_diff(w[1].col) == 1)
        );
    }

    #[test]
    fn tall_rectangle_stays_in_bounds() {
        let mut out = Vec::new();
        gilbert_order(13, 5, &mut out);
        assert_eq!(out.len(), 65);
        assert!(out.iter().all(|c| c.row < 13 && c.col < 5));
    }
}
