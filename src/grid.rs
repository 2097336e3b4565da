use crate::Coords;

/// Smallest playfield the engine accepts in either dimension.
pub const MIN_GRID_SIDE: i32 = 5;

/// A fixed-size playfield. The outermost ring of cells is always wall,
/// so only the interior is playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    height: i32,
    width: i32,
}

impl Grid {
    pub fn new(height: i32, width: i32) -> Self {
        debug_assert!(height >= MIN_GRID_SIDE && width >= MIN_GRID_SIDE);
        Grid { height, width }
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    /// True iff `pos` lies strictly inside the border.
    pub fn is_interior(&self, pos: Coords) -> bool {
        let (row, col) = pos;
        row > 0 && row < self.height - 1 && col > 0 && col < self.width - 1
    }

    pub fn center(&self) -> Coords {
        (self.height / 2, self.width / 2)
    }

    /// Inclusive-exclusive row range of the interior.
    pub fn interior_rows(&self) -> std::ops::Range<i32> {
        1..self.height - 1
    }

    pub fn interior_cols(&self) -> std::ops::Range<i32> {
        1..self.width - 1
    }

    /// Interior cells in row-major order.
    pub fn interior_cells(&self) -> impl Iterator<Item = Coords> {
        let cols = self.interior_cols();
        self.interior_rows()
            .flat_map(move |row| cols.clone().map(move |col| (row, col)))
    }

    pub fn interior_len(&self) -> usize {
        ((self.height - 2) * (self.width - 2)) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_cells_are_not_interior() {
        let grid = Grid::new(20, 40);

        assert!(!grid.is_interior((0, 10)));
        assert!(!grid.is_interior((19, 10)));
        assert!(!grid.is_interior((10, 0)));
        assert!(!grid.is_interior((10, 39)));
        assert!(!grid.is_interior((-1, 10)));
        assert!(!grid.is_interior((10, 40)));
    }

    #[test]
    fn cells_next_to_border_are_interior() {
        let grid = Grid::new(20, 40);

        assert!(grid.is_interior((1, 1)));
        assert!(grid.is_interior((18, 38)));
        assert!(grid.is_interior(grid.center()));
    }

    #[test]
    fn interior_cells_cover_the_playable_area() {
        let grid = Grid::new(5, 6);
        let cells: Vec<Coords> = grid.interior_cells().collect();

        assert_eq!(cells.len(), grid.interior_len());
        assert_eq!(cells.len(), 3 * 4);
        assert_eq!(cells[0], (1, 1));
        assert_eq!(cells[cells.len() - 1], (3, 4));
        assert!(cells.iter().all(|c| grid.is_interior(*c)));
    }
}
