//! Peano curve on the enclosing 3^n square, clipped to the grid.
//!
//! A block of side 3^l is split into nine sub-blocks visited column by
//! column in serpentine order. Each sub-block is mirrored horizontally when
//! its row index is odd and vertically when its column index is odd; mirrors
//! compose by XOR down the recursion.

use sf_core::grid::Coord;

/// Smallest power of three covering `side` cells.
#[must_use]
pub fn side_for(side: usize) -> usize {
    let mut s = 1usize;
    while s < side {
        s *= 3;
    }
    s
}

/// Append the clipped Peano order of a `height × width` grid to `out`.
///
/// # Example
/// ```
/// use sf_core::grid::Coord;
/// use sf_curve::peano::peano_order;
/// let mut out = Vec::new();
/// peano_order(3, 3, &mut out);
/// assert_eq!(&out[..3], &[Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)]);
/// assert_eq!(out[8], Coord::new(2, 2));
/// ```
pub fn peano_order(height: usize, width: usize, out: &mut Vec<Coord>) {
    let side = side_for(height.max(width));
    out.reserve(height * width);
    let block = Block {
        x: 0,
        y: 0,
        side,
        flip_x: false,
        flip_y: false,
    };
    visit(block, height, width, out);
}

#[derive(Clone, Copy)]
struct Block {
    x: usize,
    y: usize,
    side: usize,
    flip_x: bool,
    flip_y: bool,
}

fn visit(b: Block, height: usize, width: usize, out: &mut Vec<Coord>) {
    if b.x >= width || b.y >= height {
        return;
    }
    if b.side == 1 {
        out.push(Coord::new(b.y, b.x));
        return;
    }
    let third = b.side / 3;
    for i in 0..3 {
        for step in 0..3 {
            let j = if i % 2 == 1 { 2 - step } else { step };
            let ax = if b.flip_x { 2 - i } else { i };
            let ay = if b.flip_y { 2 - j } else { j };
            let sub = Block {
                x: b.x + ax * third,
                y: b.y + ay * third,
                side: third,
                flip_x: b.flip_x ^ (j % 2 == 1),
                flip_y: b.flip_y ^ (i % 2 == 1),
            };
            visit(sub, height, width, out);
        }
    }
}
