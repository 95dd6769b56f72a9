//! Error types surfaced by the engine.
//!
//! Init failures are fatal for an engine instance. Everything else is a
//! rejected call that leaves the prior state untouched.

use thiserror::Error;

/// Errors raised while allocating an engine instance.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InitError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("target steps per second must be positive and finite, got {0}")]
    InvalidStepRate(f64),
    #[error("zoom bounds must satisfy 0 < min <= max, got {min}..{max}")]
    InvalidZoomBounds { min: f32, max: f32 },
    #[error("color table needs at least a background entry")]
    EmptyColorTable,
    #[error("rule set must allow at least one alive state")]
    NoAliveStates,
    #[error("invalid seed weights: {0}")]
    InvalidSeedWeights(String),
    #[error("invalid initial viewport: {0}")]
    Viewport(#[from] ResizeError),
    #[error("compute pool unavailable: {0}")]
    ComputeUnavailable(String),
}

/// Calls made in a state that does not accept them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidStateError {
    #[error("engine is not initialized")]
    NotInitialized,
    #[error("operation not allowed while the simulation is running")]
    Running,
    #[error("operation not allowed while the simulation is stopped")]
    Stopped,
}

/// Viewport dimensions that cannot be mapped onto the grid.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ResizeError {
    #[error("viewport must be positive and finite, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}

/// Whole-grid writes with the wrong shape.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("expected a {expected_width}x{expected_height} grid, got {width}x{height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },
    #[error("{width}x{height} grid needs {expected} cells, got {actual}")]
    CellCount {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}

/// Any error the engine's public surface can report.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Init(#[from] InitError),
    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),
    #[error(transparent)]
    Resize(#[from] ResizeError),
    #[error(transparent)]
    Grid(#[from] GridError),
}
