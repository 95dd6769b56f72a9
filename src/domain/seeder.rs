use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{Cell, Grid};
use crate::error::InitError;

/// Fills grids with random cell values drawn from a weighted distribution.
/// `weights[v]` is the relative frequency of state `v`.
pub struct Seeder {
    rng: StdRng,
    distribution: WeightedIndex<u32>,
}

impl Seeder {
    /// `seed == None` draws the RNG seed from the OS
    pub fn new(weights: &[u32], seed: Option<u64>) -> Result<Self, InitError> {
        let distribution = WeightedIndex::new(weights.iter().copied())
            .map_err(|e| InitError::InvalidSeedWeights(e.to_string()))?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self { rng, distribution })
    }

    /// Overwrite every cell of `grid`
    pub fn fill(&mut self, grid: &mut Grid) {
        let Self { rng, distribution } = self;
        grid.cells_mut()
            .iter_mut()
            .for_each(|cell| *cell = Cell(distribution.sample(&mut *rng) as u32));
    }
}
