//! Step and render cost at the preset grid sizes

use std::time::Instant;

use cytomachia::application::Camera;
use cytomachia::domain::{Algorithm, Grid, RuleEngine, RuleSet, Seeder};
use cytomachia::rendering::{ColorTable, EdgeMode, Renderer};

fn random_grid(width: usize, height: usize) -> Grid {
    let mut grid = Grid::new(width, height);
    match Seeder::new(&[7, 3], Some(1)) {
        Ok(mut seeder) => seeder.fill(&mut grid),
        Err(e) => eprintln!("seeding failed: {e}"),
    }
    grid
}

/// Average milliseconds per full rule pass
fn benchmark_step(algorithm: Algorithm, grid: &Grid, iterations: u32) -> f64 {
    let engine = match RuleEngine::new(Box::new(RuleSet::conway()), algorithm, 0) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{e}");
            return f64::NAN;
        }
    };
    let mut current = grid.clone();
    let mut next = Grid::new(grid.width(), grid.height());

    let start = Instant::now();
    for _ in 0..iterations {
        engine.step(&current, &mut next);
        std::mem::swap(&mut current, &mut next);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

/// Average milliseconds per rendered frame at the given viewport size
fn benchmark_render(grid: &Grid, viewport: (usize, usize), iterations: u32) -> f64 {
    let (width, height) = grid.dimensions();
    let mut camera = Camera::new(width, height, 0.1, 100.0);
    if let Err(e) = camera.on_resize(viewport.0 as f32, viewport.1 as f32) {
        eprintln!("{e}");
        return f64::NAN;
    }
    let mut renderer = Renderer::new(
        ColorTable::default(),
        EdgeMode::Background,
        viewport.0,
        viewport.1,
    );

    let start = Instant::now();
    for _ in 0..iterations {
        renderer.render(grid, &camera);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== Rule pass and render benchmark ===\n");

    let sizes = [(444, 256), (1280, 720), (1920, 1080), (2560, 1444)];
    let iterations = 50;

    println!(
        "{:>12} {:>12} {:>12} {:>10} {:>12} {:>14}",
        "Grid", "Serial", "Parallel", "Speedup", "Render", "Steps/s (par)"
    );
    println!("{:-<78}", "");

    for (width, height) in sizes {
        let grid = random_grid(width, height);
        let serial_ms = benchmark_step(Algorithm::Serial, &grid, iterations);
        let parallel_ms = benchmark_step(Algorithm::Parallel, &grid, iterations);
        let render_ms = benchmark_render(&grid, (1920, 1080), iterations);

        println!(
            "{:>12} {:>12.2} {:>12.2} {:>9.1}x {:>12.2} {:>14.0}",
            format!("{width}x{height}"),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms,
            render_ms,
            1000.0 / parallel_ms,
        );
    }

    let cells = 2560.0 * 1444.0;
    let grid = random_grid(2560, 1444);
    let parallel_ms = benchmark_step(Algorithm::Parallel, &grid, iterations);
    println!(
        "\nThroughput at 2560x1444: {:.1}M cells/sec",
        cells / (parallel_ms / 1000.0) / 1_000_000.0
    );
}
