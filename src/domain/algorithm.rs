//! Dispatch strategy for the rule pass.
//!
//! Both strategies produce identical grids; they only differ in how the
//! per-cell work is scheduled.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Row by row on the calling thread
    Serial,
    /// Rows spread across the engine's rayon pool
    #[default]
    Parallel,
}

impl Algorithm {
    /// Get all available algorithms
    pub fn all() -> Vec<Algorithm> {
        vec![Algorithm::Serial, Algorithm::Parallel]
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Serial => "Serial",
            Algorithm::Parallel => "Parallel",
        }
    }
}
