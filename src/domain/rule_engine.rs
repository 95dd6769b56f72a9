use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::{Algorithm, Cell, Grid, Rule};
use crate::error::InitError;

/// Count live neighbours of (x, y) using toroidal wrapping
pub fn count_live_neighbors(grid: &Grid, x: usize, y: usize) -> u8 {
    let (x, y) = (x as isize, y as isize);

    (-1..=1)
        .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
        .filter(|&(dx, dy)| dx != 0 || dy != 0)
        .filter(|&(dx, dy)| grid.get_wrapped(x + dx, y + dy).is_alive())
        .count() as u8
}

/// Compute one output row from the three wrapped input rows around it
fn evolve_row(rule: &dyn Rule, current: &Grid, y: usize, out: &mut [Cell]) {
    let (w, h) = current.dimensions();
    let up = current.row((y + h - 1) % h);
    let mid = current.row(y);
    let down = current.row((y + 1) % h);

    for (x, slot) in out.iter_mut().enumerate() {
        let left = (x + w - 1) % w;
        let right = (x + 1) % w;
        let neighbors = [
            up[left], up[x], up[right],
            mid[left], mid[right],
            down[left], down[x], down[right],
        ]
        .iter()
        .filter(|cell| cell.is_alive())
        .count() as u8;
        *slot = rule.evolve(mid[x], neighbors);
    }
}

/// Applies a rule to every cell of a grid in one logical step.
///
/// A pass reads only `current` and writes only `next`, so the order in which
/// rows are processed never changes the result.
pub struct RuleEngine {
    rule: Box<dyn Rule>,
    algorithm: Algorithm,
    pool: ThreadPool,
}

impl RuleEngine {
    /// `worker_threads == 0` lets rayon pick one worker per core
    pub fn new(
        rule: Box<dyn Rule>,
        algorithm: Algorithm,
        worker_threads: usize,
    ) -> Result<Self, InitError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_threads)
            .thread_name(|i| format!("cytomachia-step-{i}"))
            .build()
            .map_err(|e| InitError::ComputeUnavailable(e.to_string()))?;

        Ok(Self { rule, algorithm, pool })
    }

    pub fn rule(&self) -> &dyn Rule {
        self.rule.as_ref()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn worker_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Next value of a single cell
    pub fn evaluate(&self, current: &Grid, x: usize, y: usize) -> Cell {
        let cell = current.get_wrapped(x as isize, y as isize);
        self.rule.evolve(cell, count_live_neighbors(current, x, y))
    }

    /// Full-grid pass from `current` into `next`
    pub fn step(&self, current: &Grid, next: &mut Grid) {
        debug_assert!(current.same_shape(next));
        let width = current.width();
        let rule = self.rule.as_ref();

        match self.algorithm {
            Algorithm::Serial => {
                next.cells_mut()
                    .chunks_mut(width)
                    .enumerate()
                    .for_each(|(y, row)| evolve_row(rule, current, y, row));
            }
            Algorithm::Parallel => self.pool.install(|| {
                next.cells_mut()
                    .par_chunks_mut(width)
                    .enumerate()
                    .for_each(|(y, row)| evolve_row(rule, current, y, row));
            }),
        }
    }
}
