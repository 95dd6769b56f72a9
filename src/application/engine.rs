use std::time::Instant;

use log::{debug, info, warn};

use super::{Camera, SimulationConfig, StepScheduler};
use crate::domain::{Cell, Grid, GridStateStore, Pattern, RuleEngine, Seeder};
use crate::error::{EngineError, InitError, InvalidStateError};
use crate::rendering::{Raster, Renderer};

/// Lifecycle of the frame-driven loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Stopped,
    Running,
    Paused,
}

/// What one frame callback did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameStats {
    pub steps: u32,
    pub generation: u64,
}

/// Everything allocated by `init` and released by `stop`
struct Resources {
    store: GridStateStore,
    rule_engine: RuleEngine,
    scheduler: StepScheduler,
    camera: Camera,
    renderer: Renderer,
    seeder: Seeder,
}

impl Resources {
    /// One full rule pass followed by the buffer swap
    fn step(&mut self) {
        let rule_engine = &self.rule_engine;
        self.store.advance(|current, next| rule_engine.step(current, next));
    }

    fn render(&mut self) -> &Raster {
        self.renderer.render(self.store.read(), &self.camera)
    }
}

/// SimulationEngine orchestrates stepping, camera and rendering.
///
/// It is driven cooperatively: the host calls `frame` once per display
/// refresh and every other method between frames. All mutation happens on
/// the caller's thread; only the rule pass fans out to the worker pool and
/// it completes before `frame` or `step_once` return.
pub struct SimulationEngine {
    config: SimulationConfig,
    state: EngineState,
    frame_pending: bool,
    generation: u64,
    resources: Option<Resources>,
}

impl SimulationEngine {
    /// Create an engine; nothing is allocated until `init`
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            state: EngineState::Stopped,
            frame_pending: false,
            generation: 0,
            resources: None,
        }
    }

    /// Create and initialize in one go
    pub fn with_viewport(
        config: SimulationConfig,
        viewport_width: u32,
        viewport_height: u32,
    ) -> Result<Self, InitError> {
        let mut engine = Self::new(config);
        engine.init(viewport_width, viewport_height)?;
        Ok(engine)
    }

    /// Allocate grid buffers, camera, worker pool and render target.
    /// Re-initializing replaces the previous grid and leaves the engine stopped.
    pub fn init(&mut self, viewport_width: u32, viewport_height: u32) -> Result<(), InitError> {
        let config = &self.config;
        config.validate()?;

        let step_interval = config.step_interval()?;

        let mut camera = Camera::new(
            config.grid_width,
            config.grid_height,
            config.zoom_min,
            config.zoom_max,
        );
        camera.on_resize(viewport_width as f32, viewport_height as f32)?;

        let rule_engine = RuleEngine::new(
            Box::new(config.rule.clone()),
            config.algorithm,
            config.worker_threads,
        )?;
        let seeder = Seeder::new(&config.seed_weights, config.seed)?;

        let resources = Resources {
            store: GridStateStore::new(config.grid_width, config.grid_height),
            rule_engine,
            scheduler: StepScheduler::new(step_interval),
            camera,
            renderer: Renderer::new(
                config.colors.clone(),
                config.edge_mode,
                viewport_width as usize,
                viewport_height as usize,
            ),
            seeder,
        };

        info!(
            "initialized {}x{} grid, rule {} ({}), {} steps/s, {} workers",
            config.grid_width,
            config.grid_height,
            config.rule,
            config.algorithm.name(),
            config.target_steps_per_second,
            resources.rule_engine.worker_threads(),
        );

        self.resources = Some(resources);
        self.state = EngineState::Stopped;
        self.frame_pending = false;
        self.generation = 0;
        Ok(())
    }

    fn resources(&self) -> Result<&Resources, InvalidStateError> {
        self.resources.as_ref().ok_or(InvalidStateError::NotInitialized)
    }

    fn resources_mut(&mut self) -> Result<&mut Resources, InvalidStateError> {
        self.resources.as_mut().ok_or(InvalidStateError::NotInitialized)
    }

    /// Begin (or resume) the frame loop. No-op while already running.
    pub fn start(&mut self) -> Result<(), InvalidStateError> {
        let resources = self
            .resources
            .as_mut()
            .ok_or(InvalidStateError::NotInitialized)?;
        if self.state == EngineState::Running {
            return Ok(());
        }
        resources.scheduler.reset_timestamp();
        self.state = EngineState::Running;
        self.frame_pending = true;
        info!("simulation started");
        Ok(())
    }

    /// Toggle between running and paused
    pub fn pause(&mut self) -> Result<(), InvalidStateError> {
        self.resources()?;
        self.state = match self.state {
            EngineState::Running => EngineState::Paused,
            EngineState::Paused => EngineState::Running,
            EngineState::Stopped => {
                warn!("pause rejected: simulation is stopped");
                return Err(InvalidStateError::Stopped);
            }
        };
        debug!("simulation {:?}", self.state);
        Ok(())
    }

    /// Cancel the pending frame and release all buffers
    pub fn stop(&mut self) {
        self.frame_pending = false;
        self.state = EngineState::Stopped;
        if self.resources.take().is_some() {
            info!("simulation stopped after {} generations", self.generation);
        }
    }

    /// Run exactly one step and render it. Rejected while running.
    pub fn step_once(&mut self) -> Result<(), InvalidStateError> {
        if self.state == EngineState::Running {
            warn!("step rejected: simulation is running");
            return Err(InvalidStateError::Running);
        }
        let resources = self.resources_mut()?;
        resources.step();
        resources.render();
        self.generation += 1;
        Ok(())
    }

    /// Frame callback. Runs every step that is due, then renders.
    /// Returns `None` when no frame is pending (the loop is stopped).
    pub fn frame(&mut self, now: Instant) -> Option<FrameStats> {
        if !self.frame_pending {
            return None;
        }
        let running = self.state == EngineState::Running;
        let resources = self.resources.as_mut()?;

        let steps = resources.scheduler.due_steps(now, running);
        for _ in 0..steps {
            resources.step();
        }
        resources.render();

        if steps > 1 {
            debug!("caught up {steps} steps in one frame");
        }
        self.generation += u64::from(steps);
        Some(FrameStats {
            steps,
            generation: self.generation,
        })
    }

    /// Fill both buffers with fresh weighted-random cells
    pub fn randomize_grid(&mut self) -> Result<(), EngineError> {
        let resources = self.resources_mut()?;
        let (width, height) = resources.store.dimensions();
        let mut grid = Grid::new(width, height);
        resources.seeder.fill(&mut grid);

        self.install_grid(grid)?;
        self.generation = 0;
        info!("grid randomized");
        Ok(())
    }

    /// Kill every cell
    pub fn clear_grid(&mut self) -> Result<(), EngineError> {
        let (width, height) = self.resources()?.store.dimensions();
        self.install_grid(Grid::new(width, height))?;
        self.generation = 0;
        Ok(())
    }

    /// Stamp a pattern onto the current state with its top-left at (x, y)
    pub fn load_pattern(
        &mut self,
        pattern: &Pattern,
        x: usize,
        y: usize,
    ) -> Result<(), EngineError> {
        let mut grid = self.resources()?.store.read().clone();
        pattern.stamp(&mut grid, x, y, Cell::ALIVE);
        self.install_grid(grid)?;
        debug!("placed {} at ({x}, {y})", pattern.name);
        Ok(())
    }

    /// Replace both buffers with `grid` while stepping is suspended, then
    /// restore the previous state and present the result.
    fn install_grid(&mut self, grid: Grid) -> Result<(), EngineError> {
        let resources = self
            .resources
            .as_mut()
            .ok_or(InvalidStateError::NotInitialized)?;
        let prior = self.state;
        if prior == EngineState::Running {
            self.state = EngineState::Paused;
        }

        // Rule passes complete inside `step`, so nothing is in flight here
        let written = resources.store.write_both(grid);
        if written.is_ok() {
            resources.store.reset_index();
            resources.render();
        }

        self.state = prior;
        written.map_err(EngineError::from)
    }

    /// New viewport size: camera first, then the render target, then a fresh frame
    pub fn resize(&mut self, viewport_width: u32, viewport_height: u32) -> Result<(), EngineError> {
        let resources = self.resources_mut()?;
        if let Err(e) = resources
            .camera
            .on_resize(viewport_width as f32, viewport_height as f32)
        {
            warn!("resize rejected: {e}");
            return Err(e.into());
        }
        resources
            .renderer
            .resize(viewport_width as usize, viewport_height as usize);
        resources.render();
        debug!("viewport resized to {viewport_width}x{viewport_height}");
        Ok(())
    }

    /// Pan by a screen-space drag
    pub fn pan(&mut self, dx_screen: f32, dy_screen: f32) -> Result<(), InvalidStateError> {
        self.resources_mut()?.camera.pan(dx_screen, dy_screen);
        Ok(())
    }

    /// Zoom around a screen point
    pub fn zoom_at(
        &mut self,
        screen_x: f32,
        screen_y: f32,
        multiplier: f32,
    ) -> Result<(), InvalidStateError> {
        self.resources_mut()?
            .camera
            .zoom_at(screen_x, screen_y, multiplier);
        Ok(())
    }

    pub fn reset_camera(&mut self) -> Result<(), InvalidStateError> {
        self.resources_mut()?.camera.reset();
        Ok(())
    }

    /// Present the current state immediately
    pub fn render(&mut self) -> Result<&Raster, InvalidStateError> {
        Ok(self.resources_mut()?.render())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.resources.is_some()
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Steps applied since the grid was last seeded
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current grid state
    pub fn grid(&self) -> Option<&Grid> {
        self.resources.as_ref().map(|r| r.store.read())
    }

    pub fn store(&self) -> Option<&GridStateStore> {
        self.resources.as_ref().map(|r| &r.store)
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.resources.as_ref().map(|r| &r.camera)
    }

    pub fn scheduler(&self) -> Option<&StepScheduler> {
        self.resources.as_ref().map(|r| &r.scheduler)
    }

    /// Last presented frame
    pub fn raster(&self) -> Option<&Raster> {
        self.resources.as_ref().map(|r| r.renderer.raster())
    }
}
