use super::Grid;
use crate::error::GridError;

/// Ping-pong pair of same-size grids.
///
/// `buffers[pingpong]` is the authoritative current state, the other buffer
/// is the write target of the next step. The two never alias.
pub struct GridStateStore {
    buffers: [Grid; 2],
    pingpong: usize,
}

impl GridStateStore {
    /// Allocate both buffers, all cells dead
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buffers: [Grid::new(width, height), Grid::new(width, height)],
            pingpong: 0,
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.buffers[0].dimensions()
    }

    /// Current state
    pub fn read(&self) -> &Grid {
        &self.buffers[self.pingpong]
    }

    pub fn pingpong_index(&self) -> usize {
        self.pingpong
    }

    /// Both buffers in storage order (A, B)
    pub fn buffers(&self) -> (&Grid, &Grid) {
        (&self.buffers[0], &self.buffers[1])
    }

    pub fn swap(&mut self) {
        self.pingpong ^= 1;
    }

    pub fn reset_index(&mut self) {
        self.pingpong = 0;
    }

    /// Replace both buffers with the same content
    pub fn write_both(&mut self, cells: Grid) -> Result<(), GridError> {
        if !cells.same_shape(&self.buffers[0]) {
            let (expected_width, expected_height) = self.dimensions();
            let (width, height) = cells.dimensions();
            return Err(GridError::DimensionMismatch {
                expected_width,
                expected_height,
                width,
                height,
            });
        }
        let other = 1 - self.pingpong;
        self.buffers[other].clone_from(&cells);
        self.buffers[self.pingpong] = cells;
        Ok(())
    }

    /// Run one step: `f` reads the current buffer and fills the next one,
    /// then the roles swap.
    pub fn advance<F>(&mut self, f: F)
    where
        F: FnOnce(&Grid, &mut Grid),
    {
        let (a, b) = self.buffers.split_at_mut(1);
        let (current, next) = if self.pingpong == 0 {
            (&a[0], &mut b[0])
        } else {
            (&b[0], &mut a[0])
        };
        f(current, next);
        self.swap();
    }
}
