//! Read-only occupancy costmap view and a dense grid implementation.
//!
//! Costs are `u8` values. Anything at or above
//! [`INSCRIBED_INFLATED_OBSTACLE`] is treated as an obstacle footprint: the
//! robot's centre must never be sent there.

/// Cost of a cell with nothing in it.
pub const FREE_SPACE: u8 = 0;
/// Cost of a cell within the robot's inscribed radius of an obstacle.
pub const INSCRIBED_INFLATED_OBSTACLE: u8 = 253;
/// Cost of a cell occupied by an obstacle.
pub const LETHAL_OBSTACLE: u8 = 254;
/// Cost of a cell that has never been observed.
pub const NO_INFORMATION: u8 = 255;

/// Returns `true` if a goal placed on a cell of this cost must be rejected.
#[inline]
pub const fn is_forbidden(cost: u8) -> bool {
    cost >= INSCRIBED_INFLATED_OBSTACLE
}

/// Index of a cell in the costmap grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Read-only access to a 2D occupancy costmap.
///
/// Implementations are shared between the perception side (which rewrites
/// costs) and the behaviors (which only read), so every method takes `&self`.
pub trait CostMap: Send + Sync {
    /// Grid size in cells (width, height).
    fn size_in_cells(&self) -> (u32, u32);

    /// Converts world coordinates to a cell, or `None` if the point lies off the grid.
    fn world_to_cell(&self, wx: f64, wy: f64) -> Option<Cell>;

    /// World coordinates of the centre of `cell`.
    fn cell_to_world(&self, cell: Cell) -> (f64, f64);

    /// Cost of `cell`. Cells outside the grid report [`NO_INFORMATION`].
    fn cost(&self, cell: Cell) -> u8;

    fn contains(&self, cell: Cell) -> bool {
        let (width, height) = self.size_in_cells();
        cell.x < width && cell.y < height
    }
}

/// Dense row-major costmap with a uniform resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct GridCostMap {
    width: u32,
    height: u32,
    resolution: f64,
    origin_x: f64,
    origin_y: f64,
    costs: Vec<u8>,
}

impl GridCostMap {
    /// Creates a grid filled with `default_cost`.
    ///
    /// `origin_x` / `origin_y` are the world coordinates of the lower-left
    /// corner of cell (0, 0); `resolution` is the cell edge length in meters.
    pub fn new(
        width: u32,
        height: u32,
        resolution: f64,
        origin_x: f64,
        origin_y: f64,
        default_cost: u8,
    ) -> Self {
        Self {
            width,
            height,
            resolution,
            origin_x,
            origin_y,
            costs: vec![default_cost; width as usize * height as usize],
        }
    }

    /// Grid of free cells.
    pub fn free(width: u32, height: u32, resolution: f64, origin_x: f64, origin_y: f64) -> Self {
        Self::new(width, height, resolution, origin_x, origin_y, FREE_SPACE)
    }

    /// Sets the cost of one cell. Returns `false` if the cell lies off the grid.
    pub fn set_cost(&mut self, cell: Cell, cost: u8) -> bool {
        match self.index(cell) {
            Some(index) => {
                self.costs[index] = cost;
                true
            }
            None => false,
        }
    }

    /// Overwrites every cell with `cost`.
    pub fn fill(&mut self, cost: u8) {
        self.costs.fill(cost);
    }

    /// Sets `cost` on every cell whose centre lies inside the closed world
    /// rectangle `[min_x, max_x] x [min_y, max_y]`. Returns the number of cells touched.
    pub fn fill_world_rect(
        &mut self,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
        cost: u8,
    ) -> usize {
        let mut touched = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = Cell::new(x, y);
                let (wx, wy) = self.cell_to_world(cell);
                if (min_x..=max_x).contains(&wx) && (min_y..=max_y).contains(&wy) {
                    self.set_cost(cell, cost);
                    touched += 1;
                }
            }
        }
        touched
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }
}

impl CostMap for GridCostMap {
    fn size_in_cells(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn world_to_cell(&self, wx: f64, wy: f64) -> Option<Cell> {
        if !wx.is_finite() || !wy.is_finite() || wx < self.origin_x || wy < self.origin_y {
            return None;
        }

        let cx = ((wx - self.origin_x) / self.resolution).floor();
        let cy = ((wy - self.origin_y) / self.resolution).floor();
        if cx >= f64::from(self.width) || cy >= f64::from(self.height) {
            return None;
        }

        Some(Cell::new(cx as u32, cy as u32))
    }

    fn cell_to_world(&self, cell: Cell) -> (f64, f64) {
        (
            self.origin_x + (f64::from(cell.x) + 0.5) * self.resolution,
            self.origin_y + (f64::from(cell.y) + 0.5) * self.resolution,
        )
    }

    fn cost(&self, cell: Cell) -> u8 {
        self.index(cell)
            .map(|index| self.costs[index])
            .unwrap_or(NO_INFORMATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> GridCostMap {
        // 10m x 10m centred on the world origin, 0.1m cells.
        GridCostMap::free(100, 100, 0.1, -5.0, -5.0)
    }

    #[test]
    fn world_to_cell_rejects_points_off_the_grid() {
        let map = arena();
        assert!(map.world_to_cell(-5.01, 0.0).is_none());
        assert!(map.world_to_cell(0.0, 5.0).is_none());
        assert!(map.world_to_cell(f64::NAN, 0.0).is_none());
        assert_eq!(map.world_to_cell(-5.0, -5.0), Some(Cell::new(0, 0)));
        assert_eq!(map.world_to_cell(4.99, 4.99), Some(Cell::new(99, 99)));
    }

    #[test]
    fn cell_to_world_returns_cell_centre() {
        let map = arena();
        let (wx, wy) = map.cell_to_world(Cell::new(50, 50));
        assert!((wx - 0.05).abs() < 1e-9);
        assert!((wy - 0.05).abs() < 1e-9);

        let back = map.world_to_cell(wx, wy);
        assert_eq!(back, Some(Cell::new(50, 50)));
    }

    #[test]
    fn out_of_bounds_cost_is_no_information() {
        let map = arena();
        assert_eq!(map.cost(Cell::new(100, 0)), NO_INFORMATION);
        assert_eq!(map.cost(Cell::new(3, 3)), FREE_SPACE);
    }

    #[test]
    fn fill_world_rect_marks_cells_by_centre() {
        let mut map = arena();
        let touched = map.fill_world_rect(2.4, -0.1, 2.8, 0.1, LETHAL_OBSTACLE);
        assert_eq!(touched, 4 * 2);

        let inside = map.world_to_cell(2.55, 0.05).unwrap();
        let outside = map.world_to_cell(2.25, 0.05).unwrap();
        assert_eq!(map.cost(inside), LETHAL_OBSTACLE);
        assert_eq!(map.cost(outside), FREE_SPACE);
    }

    #[test]
    fn forbidden_threshold_starts_at_inscribed() {
        assert!(!is_forbidden(252));
        assert!(is_forbidden(INSCRIBED_INFLATED_OBSTACLE));
        assert!(is_forbidden(LETHAL_OBSTACLE));
        assert!(is_forbidden(NO_INFORMATION));
    }
}
