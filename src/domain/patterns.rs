use super::{Cell, Grid};

/// A small seed pattern that can be stamped onto the grid
#[derive(Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<(usize, usize)>, // Relative coordinates of alive cells
}

impl Pattern {
    /// Create a new pattern from alive cell coordinates
    pub fn new(name: &'static str, description: &'static str, cells: Vec<(usize, usize)>) -> Self {
        let width = cells.iter().map(|(x, _)| *x).max().unwrap_or(0) + 1;
        let height = cells.iter().map(|(_, y)| *y).max().unwrap_or(0) + 1;
        Self { name, description, width, height, cells }
    }

    /// Write `value` into the pattern's cells with its top-left at (x, y).
    /// Coordinates wrap around the grid edges.
    pub fn stamp(&self, grid: &mut Grid, x: usize, y: usize, value: Cell) {
        for &(dx, dy) in &self.cells {
            let (gx, gy) = grid.wrap((x + dx) as isize, (y + dy) as isize);
            grid.set(gx, gy, value);
        }
    }
}

/// Classic Life patterns
pub mod presets {
    use super::*;

    /// Glider - simplest spaceship, moves (+1, +1) every 4 generations
    pub fn glider() -> Pattern {
        Pattern::new(
            "Glider",
            "Moves diagonally (period 4)",
            vec![
                (1, 0),
                (2, 1),
                (0, 2), (1, 2), (2, 2),
            ],
        )
    }

    /// Blinker - period 2 oscillator
    pub fn blinker() -> Pattern {
        Pattern::new(
            "Blinker",
            "Oscillator (period 2)",
            vec![(0, 1), (1, 1), (2, 1)],
        )
    }

    /// Toad - period 2 oscillator
    pub fn toad() -> Pattern {
        Pattern::new(
            "Toad",
            "Oscillator (period 2)",
            vec![
                (1, 0), (2, 0), (3, 0),
                (0, 1), (1, 1), (2, 1),
            ],
        )
    }

    /// Lightweight Spaceship (LWSS)
    pub fn lwss() -> Pattern {
        Pattern::new(
            "LWSS",
            "Lightweight Spaceship (period 4)",
            vec![
                (1, 0), (4, 0),
                (0, 1),
                (0, 2), (4, 2),
                (0, 3), (1, 3), (2, 3), (3, 3),
            ],
        )
    }

    /// R-pentomino - methuselah, stabilizes after 1103 generations
    pub fn r_pentomino() -> Pattern {
        Pattern::new(
            "R-pentomino",
            "Methuselah - stabilizes at gen 1103",
            vec![
                (1, 0), (2, 0),
                (0, 1), (1, 1),
                (1, 2),
            ],
        )
    }

    /// Block - simple still life
    pub fn block() -> Pattern {
        Pattern::new(
            "Block",
            "Still life",
            vec![
                (0, 0), (1, 0),
                (0, 1), (1, 1),
            ],
        )
    }

    /// Get all available patterns
    pub fn all_patterns() -> Vec<Pattern> {
        vec![glider(), blinker(), toad(), lwss(), r_pentomino(), block()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let glider = presets::glider();
        assert_eq!((glider.width, glider.height), (3, 3));
        assert_eq!(presets::lwss().width, 5);
    }

    #[test]
    fn test_stamp_wraps_at_edges() {
        let mut grid = Grid::new(4, 4);
        presets::block().stamp(&mut grid, 3, 3, Cell::ALIVE);
        for (x, y) in [(3, 3), (0, 3), (3, 0), (0, 0)] {
            assert_eq!(grid.get(x, y), Some(Cell::ALIVE), "({x}, {y})");
        }
        assert_eq!(grid.population(), 4);
    }
}
