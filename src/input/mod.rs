//! Translates macroquad keyboard, mouse and window events into engine calls.
//! Nothing here touches buffers or camera fields directly.

use log::{info, warn};
use macroquad::prelude::*;

use crate::application::{EngineState, SimulationEngine};
use crate::domain::{Pattern, presets};
use crate::error::EngineError;

/// Zoom multiplier per wheel tick
pub const ZOOM_STEP: f32 = 1.1;

/// Input bookkeeping carried between frames
pub struct InputState {
    last_drag: Option<(f32, f32)>,
    viewport: (u32, u32),
    patterns: Vec<Pattern>,
    pattern_index: usize,
}

impl InputState {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            last_drag: None,
            viewport: (viewport_width, viewport_height),
            patterns: presets::all_patterns(),
            pattern_index: 0,
        }
    }

    /// Pattern that the place key stamps
    pub fn selected_pattern(&self) -> &Pattern {
        &self.patterns[self.pattern_index]
    }

    /// Advance the selection, wrapping back to the first pattern
    pub fn cycle_pattern(&mut self) -> &Pattern {
        self.pattern_index = (self.pattern_index + 1) % self.patterns.len();
        self.selected_pattern()
    }
}

/// Current window size in pixels
pub fn viewport_size() -> (u32, u32) {
    (screen_width() as u32, screen_height() as u32)
}

/// Forward window size changes to the engine
pub fn handle_resize(
    engine: &mut SimulationEngine,
    input: &mut InputState,
) -> Result<(), EngineError> {
    let size = viewport_size();
    if size != input.viewport {
        engine.resize(size.0, size.1)?;
        input.viewport = size;
    }
    Ok(())
}

/// Zoom around the cursor with the mouse wheel
pub fn handle_zoom(
    engine: &mut SimulationEngine,
    mouse_pos: (f32, f32),
) -> Result<(), EngineError> {
    let wheel = mouse_wheel().1;
    if wheel > 0.0 {
        engine.zoom_at(mouse_pos.0, mouse_pos.1, ZOOM_STEP)?;
    } else if wheel < 0.0 {
        engine.zoom_at(mouse_pos.0, mouse_pos.1, 1.0 / ZOOM_STEP)?;
    }
    Ok(())
}

/// Pan with a left or middle button drag
pub fn handle_pan(
    engine: &mut SimulationEngine,
    input: &mut InputState,
    mouse_pos: (f32, f32),
) -> Result<(), EngineError> {
    if is_mouse_button_down(MouseButton::Left) || is_mouse_button_down(MouseButton::Middle) {
        if let Some(last) = input.last_drag {
            engine.pan(mouse_pos.0 - last.0, mouse_pos.1 - last.1)?;
        }
        input.last_drag = Some(mouse_pos);
    } else {
        input.last_drag = None;
    }
    Ok(())
}

fn toggle_running(engine: &mut SimulationEngine) -> Result<(), EngineError> {
    match engine.state() {
        EngineState::Stopped => engine.start()?,
        _ => engine.pause()?,
    }
    Ok(())
}

/// Stamp `pattern` centred on the grid
pub fn place_centered(engine: &mut SimulationEngine, pattern: &Pattern) -> Result<(), EngineError> {
    let (width, height) = engine.grid().map_or((0, 0), |g| g.dimensions());
    let x = width.saturating_sub(pattern.width) / 2;
    let y = height.saturating_sub(pattern.height) / 2;
    engine.load_pattern(pattern, x, y)
}

/// Process keyboard shortcuts. A rejected action is logged and the
/// remaining keys are still handled.
pub fn process_keyboard_input(engine: &mut SimulationEngine, input: &mut InputState) {
    type KeyAction = (KeyCode, fn(&mut SimulationEngine) -> Result<(), EngineError>);

    let actions: [KeyAction; 5] = [
        (KeyCode::Space, toggle_running),
        (KeyCode::N, |e: &mut SimulationEngine| e.step_once().map_err(EngineError::from)),
        (KeyCode::R, SimulationEngine::randomize_grid),
        (KeyCode::C, SimulationEngine::clear_grid),
        (KeyCode::H, |e: &mut SimulationEngine| e.reset_camera().map_err(EngineError::from)),
    ];

    for (key, action) in actions {
        if is_key_pressed(key) {
            if let Err(e) = action(engine) {
                warn!("{key:?} ignored: {e}");
            }
        }
    }

    if is_key_pressed(KeyCode::P) {
        let pattern = input.cycle_pattern();
        info!("selected {}: {}", pattern.name, pattern.description);
    }
    if is_key_pressed(KeyCode::G) {
        if let Err(e) = place_centered(engine, input.selected_pattern()) {
            warn!("G ignored: {e}");
        }
    }
}

/// Run all per-frame input handlers
pub fn process_input(
    engine: &mut SimulationEngine,
    input: &mut InputState,
) -> Result<(), EngineError> {
    // Camera must see the new viewport before any pan/zoom math
    handle_resize(engine, input)?;

    let mouse_pos = mouse_position();
    handle_zoom(engine, mouse_pos)?;
    handle_pan(engine, input, mouse_pos)?;
    process_keyboard_input(engine, input);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::SimulationConfig;

    #[test]
    fn test_cycle_pattern_wraps() {
        let mut input = InputState::new(100, 100);
        let count = presets::all_patterns().len();
        assert_eq!(input.selected_pattern().name, "Glider");

        let names: Vec<_> = (0..count).map(|_| input.cycle_pattern().name).collect();
        assert_eq!(names[0], "Blinker");
        assert_eq!(names[count - 1], "Glider");
        assert!(names.contains(&"Toad"));
        assert!(names.contains(&"R-pentomino"));
    }

    #[test]
    fn test_place_centered_stamps_selected_pattern() {
        let config = SimulationConfig::default()
            .with_grid_size(20, 20)
            .with_worker_threads(1);
        let mut engine = SimulationEngine::with_viewport(config, 40, 40).unwrap();
        let mut input = InputState::new(40, 40);
        input.cycle_pattern();
        input.cycle_pattern();

        let toad = input.selected_pattern().clone();
        place_centered(&mut engine, &toad).unwrap();

        let grid = engine.grid().unwrap();
        assert_eq!(grid.population(), toad.cells.len());
        // 4x2 bounding box centred on 20x20 starts at (8, 9)
        assert_eq!(grid.get(9, 9), Some(crate::domain::Cell::ALIVE));
        assert_eq!(grid.get(8, 10), Some(crate::domain::Cell::ALIVE));
    }

    #[test]
    fn test_place_centered_requires_init() {
        let mut engine = SimulationEngine::new(SimulationConfig::default());
        assert!(place_centered(&mut engine, &presets::glider()).is_err());
    }
}
