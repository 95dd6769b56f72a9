// Domain layer - grid storage and rule evaluation
pub mod domain;

// Application layer - camera, scheduling and the engine facade
pub mod application;

// Infrastructure layer - rasterizer and host input
pub mod rendering;
pub mod input;

pub mod error;

// Re-exports for convenience
pub use application::{Camera, EngineState, SimulationConfig, SimulationEngine};
pub use domain::{Cell, Grid, Pattern, RuleSet, presets};
pub use error::{EngineError, InitError, InvalidStateError, ResizeError};
pub use rendering::{ColorTable, EdgeMode, Raster};
