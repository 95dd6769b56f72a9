use super::Cell;
use crate::error::GridError;

/// Grid is one row-major buffer of cells with fixed dimensions.
/// Neighbour lookups treat it as a torus; plain `get`/`set` are bounds-checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells initially dead
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::DEAD; width * height],
        }
    }

    /// Build a grid from existing row-major cells
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        if cells.len() != width * height {
            return Err(GridError::CellCount {
                width,
                height,
                expected: width * height,
                actual: cells.len(),
            });
        }
        Ok(Self { width, height, cells })
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Convert 2D coordinates to 1D index
    pub const fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[self.index(x, y)])
    }

    /// Set cell at position, ignoring out-of-range coordinates
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    /// Wrap signed coordinates onto the torus
    pub fn wrap(&self, x: isize, y: isize) -> (usize, usize) {
        let w = self.width as isize;
        let h = self.height as isize;
        (x.rem_euclid(w) as usize, y.rem_euclid(h) as usize)
    }

    /// Cell at signed coordinates, wrapped onto the torus
    pub fn get_wrapped(&self, x: isize, y: isize) -> Cell {
        let (wx, wy) = self.wrap(x, y);
        self.cells[self.index(wx, wy)]
    }

    /// Same dimensions as `other`
    pub fn same_shape(&self, other: &Grid) -> bool {
        self.dimensions() == other.dimensions()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Row `y` as a slice
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Number of alive cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| (i % self.width, i / self.width, cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_dead() {
        let grid = Grid::new(8, 4);
        assert_eq!(grid.dimensions(), (8, 4));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_get_set_bounds() {
        let mut grid = Grid::new(4, 4);
        grid.set(3, 2, Cell(2));
        assert_eq!(grid.get(3, 2), Some(Cell(2)));
        assert_eq!(grid.get(4, 0), None);

        // Out of range writes are ignored
        grid.set(10, 10, Cell::ALIVE);
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn test_wrap_left_of_column_zero_is_last_column() {
        let grid = Grid::new(5, 3);
        for y in 0..3 {
            assert_eq!(grid.wrap(-1, y), (4, y as usize));
        }
        assert_eq!(grid.wrap(5, 0), (0, 0));
        assert_eq!(grid.wrap(0, -1), (0, 2));
        assert_eq!(grid.wrap(0, 3), (0, 0));
    }

    #[test]
    fn test_from_cells_rejects_wrong_length() {
        let err = Grid::from_cells(3, 3, vec![Cell::DEAD; 8]).unwrap_err();
        assert_eq!(
            err,
            GridError::CellCount { width: 3, height: 3, expected: 9, actual: 8 }
        );
    }

    #[test]
    fn test_iter_cells_is_row_major() {
        let mut grid = Grid::new(3, 2);
        grid.set(1, 1, Cell::ALIVE);
        let alive: Vec<_> = grid.iter_cells().filter(|(_, _, c)| c.is_alive()).collect();
        assert_eq!(alive, vec![(1, 1, Cell::ALIVE)]);
        assert_eq!(grid.row(1), &[Cell::DEAD, Cell::ALIVE, Cell::DEAD]);
    }
}
