//! Integer line rasterization over grid cells.

/// Walks the integer cells on the segment from `(x0, y0)` to `(x1, y1)`.
///
/// Classic Bresenham traversal: the dominant axis advances every step and an
/// error accumulator decides when the other axis catches up. The start cell
/// is always produced, the end cell is always the last one, and a segment
/// spanning `max(|dx|, |dy|)` cells along its dominant axis yields exactly
/// `max(|dx|, |dy|) + 1` cells in either direction.
///
/// The cursor API (`valid` / `advance` / `x` / `y`) suits early-exit scans;
/// the [`Iterator`] impl yields the same sequence as `(x, y)` pairs.
#[derive(Clone, Debug)]
pub struct LineRaster {
    x: i32,
    y: i32,
    // Per-step increments when the error term overflows (diagonal step)...
    x_inc_cross: i32,
    y_inc_cross: i32,
    // ...and on every step (dominant axis).
    x_inc_major: i32,
    y_inc_major: i32,
    den: i32,
    num: i32,
    num_add: i32,
    num_pixels: i32,
    cur_pixel: i32,
}

impl LineRaster {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let delta_x = (x1 - x0).abs();
        let delta_y = (y1 - y0).abs();

        let x_step = if x1 >= x0 { 1 } else { -1 };
        let y_step = if y1 >= y0 { 1 } else { -1 };

        if delta_x >= delta_y {
            Self {
                x: x0,
                y: y0,
                x_inc_cross: 0,
                y_inc_cross: y_step,
                x_inc_major: x_step,
                y_inc_major: 0,
                den: delta_x,
                num: delta_x / 2,
                num_add: delta_y,
                num_pixels: delta_x,
                cur_pixel: 0,
            }
        } else {
            Self {
                x: x0,
                y: y0,
                x_inc_cross: x_step,
                y_inc_cross: 0,
                x_inc_major: 0,
                y_inc_major: y_step,
                den: delta_y,
                num: delta_y / 2,
                num_add: delta_x,
                num_pixels: delta_y,
                cur_pixel: 0,
            }
        }
    }

    /// `true` while the cursor points at a cell on the segment.
    #[inline]
    pub fn valid(&self) -> bool {
        self.cur_pixel <= self.num_pixels
    }

    /// Moves the cursor to the next cell.
    pub fn advance(&mut self) {
        self.num += self.num_add;
        if self.num >= self.den {
            self.num -= self.den;
            self.x += self.x_inc_cross;
            self.y += self.y_inc_cross;
        }
        self.x += self.x_inc_major;
        self.y += self.y_inc_major;
        self.cur_pixel += 1;
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Number of cells the full segment covers, start and end included.
    #[inline]
    pub fn len_cells(&self) -> usize {
        (self.num_pixels + 1) as usize
    }
}

impl Iterator for LineRaster {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.valid() {
            return None;
        }
        let cell = (self.x, self.y);
        self.advance();
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.num_pixels - self.cur_pixel + 1).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LineRaster {}
