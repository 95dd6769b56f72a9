mod camera;
mod config;
mod engine;
mod scheduler;

pub use camera::Camera;
pub use config::SimulationConfig;
pub use engine::{EngineState, FrameStats, SimulationEngine};
pub use scheduler::StepScheduler;
