use std::time::Instant;

use cytomachia::{
    EngineState, Raster, SimulationConfig, SimulationEngine,
    input::{self, InputState},
};
use log::{error, warn};
use macroquad::prelude::*;

fn window_conf() -> Conf {
    Conf {
        window_title: "cytomachia".to_owned(),
        window_width: 1332,
        window_height: 768,
        window_resizable: true,
        ..Default::default()
    }
}

/// Copy the engine's raster into a GPU texture, reallocating on size change
fn upload(raster: &Raster, texture: &mut Option<Texture2D>) {
    let (width, height) = raster.dimensions();
    match texture {
        Some(tex) if tex.width() as usize == width && tex.height() as usize == height => {
            tex.update_from_bytes(width as u32, height as u32, raster.pixels());
        }
        _ => {
            let tex = Texture2D::from_rgba8(width as u16, height as u16, raster.pixels());
            tex.set_filter(FilterMode::Nearest);
            *texture = Some(tex);
        }
    }
}

/// Small status overlay in the top-left corner
fn draw_status(engine: &SimulationEngine, input_state: &InputState) {
    let status = match engine.state() {
        EngineState::Running => "Running",
        EngineState::Paused => "Paused",
        EngineState::Stopped => "Stopped",
    };
    let zoom = engine.camera().map_or(1.0, |c| c.zoom());
    let pattern = input_state.selected_pattern();
    let lines = [
        format!("{status} | gen {}", engine.generation()),
        format!("zoom {zoom:.1}x | {} fps", get_fps()),
        format!("pattern {}: {}", pattern.name, pattern.description),
        "Space: pause  N: step  R: random  C: clear  P: pattern  G: place  H: home".to_owned(),
    ];
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 10.0, 20.0 + i as f32 * 16.0, 16.0, Color::from_rgba(0, 255, 150, 255));
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let (width, height) = input::viewport_size();
    let config = SimulationConfig::default();
    let mut engine = match SimulationEngine::with_viewport(config, width, height) {
        Ok(engine) => engine,
        Err(e) => {
            error!("engine initialization failed: {e}");
            return;
        }
    };
    let mut input_state = InputState::new(width, height);

    if let Err(e) = engine.randomize_grid() {
        warn!("initial randomize failed: {e}");
    }
    if let Err(e) = engine.start() {
        error!("engine failed to start: {e}");
        return;
    }

    let mut texture = None;
    loop {
        if let Err(e) = input::process_input(&mut engine, &mut input_state) {
            warn!("input rejected: {e}");
        }

        engine.frame(Instant::now());

        clear_background(BLACK);
        if let Some(raster) = engine.raster() {
            upload(raster, &mut texture);
        }
        if let Some(tex) = &texture {
            draw_texture(tex, 0.0, 0.0, WHITE);
        }
        draw_status(&engine, &input_state);

        next_frame().await;
    }
}
