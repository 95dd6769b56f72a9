use std::time::Duration;

use crate::domain::{Algorithm, RuleSet};
use crate::error::InitError;
use crate::rendering::{ColorTable, EdgeMode};

/// Engine configuration, fixed once the engine is initialized
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub target_steps_per_second: f64,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub rule: RuleSet,
    pub colors: ColorTable,
    pub edge_mode: EdgeMode,
    pub algorithm: Algorithm,
    /// Rayon workers for the rule pass, 0 = one per core
    pub worker_threads: usize,
    /// Relative frequency of each cell value when randomizing
    pub seed_weights: Vec<u32>,
    /// Fixed RNG seed for reproducible randomization
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_width: 444,
            grid_height: 256,
            target_steps_per_second: 30.0,
            zoom_min: 0.1,
            zoom_max: 100.0,
            rule: RuleSet::conway(),
            colors: ColorTable::default(),
            edge_mode: EdgeMode::Background,
            algorithm: Algorithm::Parallel,
            worker_threads: 0,
            seed_weights: vec![7, 3], // 30% alive
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// 444x256 grid
    pub fn compact() -> Self {
        Self::default()
    }

    /// 1280x720 grid
    pub fn hd() -> Self {
        Self::default().with_grid_size(1280, 720)
    }

    /// 2560x1444 grid
    pub fn qhd() -> Self {
        Self::default().with_grid_size(2560, 1444)
    }

    pub fn with_grid_size(mut self, width: usize, height: usize) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    pub fn with_steps_per_second(mut self, steps: f64) -> Self {
        self.target_steps_per_second = steps;
        self
    }

    pub fn with_zoom_bounds(mut self, min: f32, max: f32) -> Self {
        self.zoom_min = min;
        self.zoom_max = max;
        self
    }

    pub fn with_rule(mut self, rule: RuleSet) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_colors(mut self, colors: ColorTable) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_edge_mode(mut self, edge_mode: EdgeMode) -> Self {
        self.edge_mode = edge_mode;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads;
        self
    }

    pub fn with_seed_weights(mut self, weights: Vec<u32>) -> Self {
        self.seed_weights = weights;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Wall time between two steps. Rates whose interval does not fit a
    /// `Duration`, or rounds down to zero, are rejected.
    pub fn step_interval(&self) -> Result<Duration, InitError> {
        let rate = self.target_steps_per_second;
        if !(rate.is_finite() && rate > 0.0) {
            return Err(InitError::InvalidStepRate(rate));
        }
        match Duration::try_from_secs_f64(1.0 / rate) {
            Ok(interval) if !interval.is_zero() => Ok(interval),
            _ => Err(InitError::InvalidStepRate(rate)),
        }
    }

    /// Check everything that does not need allocation
    pub fn validate(&self) -> Result<(), InitError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(InitError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        self.step_interval()?;

        let (min, max) = (self.zoom_min, self.zoom_max);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(InitError::InvalidZoomBounds { min, max });
        }

        if self.rule.states == 0 {
            return Err(InitError::NoAliveStates);
        }

        if self.colors.is_empty() {
            return Err(InitError::EmptyColorTable);
        }

        if self.seed_weights.len() > self.rule.states as usize + 1 {
            return Err(InitError::InvalidSeedWeights(format!(
                "{} weights for {} alive states",
                self.seed_weights.len(),
                self.rule.states
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Aging;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
        assert_eq!(SimulationConfig::qhd().validate(), Ok(()));
    }

    #[test]
    fn test_presets_sizes() {
        let qhd = SimulationConfig::qhd();
        assert_eq!((qhd.grid_width, qhd.grid_height), (2560, 1444));
        let compact = SimulationConfig::compact();
        assert_eq!((compact.grid_width, compact.grid_height), (444, 256));
    }

    #[test]
    fn test_rejects_empty_grid() {
        let config = SimulationConfig::default().with_grid_size(0, 10);
        assert_eq!(
            config.validate(),
            Err(InitError::EmptyGrid { width: 0, height: 10 })
        );
    }

    #[test]
    fn test_rejects_bad_step_rate() {
        for rate in [0.0, -1.0, f64::INFINITY, f64::NAN, 1e-20, 1e10] {
            let config = SimulationConfig::default().with_steps_per_second(rate);
            assert!(
                matches!(config.validate(), Err(InitError::InvalidStepRate(_))),
                "rate {rate}"
            );
        }
    }

    #[test]
    fn test_step_interval_for_valid_rates() {
        let config = SimulationConfig::default();
        assert_eq!(config.step_interval(), Ok(Duration::from_secs_f64(1.0 / 30.0)));

        let slow = config.with_steps_per_second(0.5);
        assert_eq!(slow.step_interval(), Ok(Duration::from_secs(2)));
    }

    #[test]
    fn test_rejects_bad_zoom_bounds() {
        for (min, max) in [(0.0, 1.0), (2.0, 1.0), (-1.0, 5.0)] {
            let config = SimulationConfig::default().with_zoom_bounds(min, max);
            assert!(matches!(config.validate(), Err(InitError::InvalidZoomBounds { .. })));
        }
    }

    #[test]
    fn test_seed_weights_limited_by_states() {
        let config = SimulationConfig::default().with_seed_weights(vec![6, 3, 1]);
        assert!(matches!(config.validate(), Err(InitError::InvalidSeedWeights(_))));

        let multi = config.with_rule(RuleSet::conway().with_states(2, Aging::Keep));
        assert_eq!(multi.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_empty_colors() {
        let config = SimulationConfig::default().with_colors(ColorTable::new(Vec::new()));
        assert_eq!(config.validate(), Err(InitError::EmptyColorTable));
    }
}
