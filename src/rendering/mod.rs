//! CPU rasterizer for the grid.
//!
//! Every output pixel centre is mapped through the camera to a world
//! coordinate and coloured from the cell under it. The grid is only read.

use rayon::prelude::*;

use crate::application::Camera;
use crate::domain::{Cell, Grid};

/// RGBA8 colour
pub type Rgba = [u8; 4];

const OPAQUE_BLACK: Rgba = [0, 0, 0, 255];

/// Maps cell values to colours. Entry 0 is the background.
/// Values past the end of the table use the last entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorTable(Vec<Rgba>);

impl ColorTable {
    pub fn new(colors: Vec<Rgba>) -> Self {
        Self(colors)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn background(&self) -> Rgba {
        self.0.first().copied().unwrap_or(OPAQUE_BLACK)
    }

    pub fn color_for(&self, cell: Cell) -> Rgba {
        let index = cell.value() as usize;
        self.0
            .get(index)
            .or(self.0.last())
            .copied()
            .unwrap_or(OPAQUE_BLACK)
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self(vec![
            OPAQUE_BLACK,
            [255, 255, 255, 255], // primary
            [0, 255, 150, 255],   // secondary
        ])
    }
}

/// How world coordinates outside the grid are sampled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EdgeMode {
    /// Draw the background colour
    #[default]
    Background,
    /// Repeat the grid like the torus it is
    Wrap,
}

/// Grid row/column under a world coordinate, if any
fn sample_axis(world: f32, size: usize, edge_mode: EdgeMode) -> Option<usize> {
    let cell = world.floor();
    if !cell.is_finite() {
        return None;
    }
    match edge_mode {
        EdgeMode::Background => (cell >= 0.0 && cell < size as f32).then_some(cell as usize),
        EdgeMode::Wrap => Some((cell as i64).rem_euclid(size as i64) as usize),
    }
}

/// Output image, row-major RGBA8
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Raster {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[i..i + 4]);
        Some(rgba)
    }
}

/// Samples the current grid through the camera into a raster
pub struct Renderer {
    colors: ColorTable,
    edge_mode: EdgeMode,
    raster: Raster,
    /// Grid column under each output column, rebuilt every frame
    columns: Vec<Option<usize>>,
}

impl Renderer {
    pub fn new(colors: ColorTable, edge_mode: EdgeMode, width: usize, height: usize) -> Self {
        Self {
            colors,
            edge_mode,
            raster: Raster::new(width, height),
            columns: Vec::with_capacity(width),
        }
    }

    /// Reallocate the render target
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.raster.dimensions() != (width, height) {
            self.raster = Raster::new(width, height);
        }
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn render(&mut self, grid: &Grid, camera: &Camera) -> &Raster {
        let (width, _) = self.raster.dimensions();
        if width == 0 {
            return &self.raster;
        }
        let (grid_width, grid_height) = grid.dimensions();
        let edge_mode = self.edge_mode;

        self.columns.clear();
        self.columns.extend((0..width).map(|px| {
            let (world_x, _) = camera.screen_to_world(px as f32 + 0.5, 0.0);
            sample_axis(world_x, grid_width, edge_mode)
        }));

        let colors = &self.colors;
        let columns = &self.columns;
        let background = colors.background();

        self.raster
            .pixels
            .par_chunks_mut(width * 4)
            .enumerate()
            .for_each(|(py, row)| {
                let (_, world_y) = camera.screen_to_world(0.0, py as f32 + 0.5);
                let cells = sample_axis(world_y, grid_height, edge_mode).map(|y| grid.row(y));

                for (pixel, column) in row.chunks_exact_mut(4).zip(columns) {
                    let color = match (cells, column) {
                        (Some(cells), Some(x)) => colors.color_for(cells[*x]),
                        _ => background,
                    };
                    pixel.copy_from_slice(&color);
                }
            });

        &self.raster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgba = [0, 0, 0, 255];
    const PRIMARY: Rgba = [255, 255, 255, 255];
    const SECONDARY: Rgba = [0, 255, 150, 255];

    fn setup(viewport: (usize, usize), grid: (usize, usize)) -> (Renderer, Camera) {
        let renderer = Renderer::new(
            ColorTable::default(),
            EdgeMode::Background,
            viewport.0,
            viewport.1,
        );
        let mut camera = Camera::new(grid.0, grid.1, 0.1, 100.0);
        camera.on_resize(viewport.0 as f32, viewport.1 as f32).unwrap();
        (renderer, camera)
    }

    #[test]
    fn test_each_cell_covers_its_pixels() {
        // 2x2 pixels per cell
        let (mut renderer, camera) = setup((8, 8), (4, 4));
        let mut grid = Grid::new(4, 4);
        grid.set(1, 2, Cell::ALIVE);
        grid.set(3, 0, Cell(2));

        let raster = renderer.render(&grid, &camera);
        for (x, y) in [(2, 4), (3, 4), (2, 5), (3, 5)] {
            assert_eq!(raster.pixel(x, y), Some(PRIMARY));
        }
        assert_eq!(raster.pixel(6, 0), Some(SECONDARY));
        assert_eq!(raster.pixel(7, 1), Some(SECONDARY));
        assert_eq!(raster.pixel(0, 0), Some(BG));
    }

    #[test]
    fn test_values_past_table_use_last_color() {
        let colors = ColorTable::default();
        assert_eq!(colors.color_for(Cell(9)), SECONDARY);
        assert_eq!(colors.color_for(Cell::DEAD), BG);
    }

    #[test]
    fn test_outside_grid_is_background() {
        let (mut renderer, mut camera) = setup((8, 8), (4, 4));
        let mut grid = Grid::new(4, 4);
        grid.cells_mut().fill(Cell::ALIVE);
        // Shift the view half a grid left, right half of the screen leaves the grid
        camera.pan(-4.0, 0.0);

        let raster = renderer.render(&grid, &camera);
        assert_eq!(raster.pixel(1, 1), Some(PRIMARY));
        assert_eq!(raster.pixel(6, 1), Some(BG));
    }

    #[test]
    fn test_wrap_mode_repeats_grid() {
        let (_, mut camera) = setup((8, 8), (4, 4));
        let mut renderer = Renderer::new(ColorTable::default(), EdgeMode::Wrap, 8, 8);
        let mut grid = Grid::new(4, 4);
        grid.set(0, 0, Cell::ALIVE);
        camera.pan(-4.0, 0.0); // world x in [2, 6)

        let raster = renderer.render(&grid, &camera);
        // Screen x 4..6 samples world column 4 which wraps to 0
        assert_eq!(raster.pixel(4, 0), Some(PRIMARY));
        assert_eq!(raster.pixel(2, 0), Some(BG));
    }

    #[test]
    fn test_render_does_not_touch_grid() {
        let (mut renderer, camera) = setup((16, 9), (4, 3));
        let mut grid = Grid::new(4, 3);
        grid.set(2, 1, Cell::ALIVE);
        let before = grid.clone();
        renderer.render(&grid, &camera);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_resize_reallocates_raster() {
        let (mut renderer, _) = setup((8, 8), (4, 4));
        renderer.resize(20, 10);
        assert_eq!(renderer.raster().dimensions(), (20, 10));
        assert_eq!(renderer.raster().pixels().len(), 20 * 10 * 4);
    }

    #[test]
    fn test_sample_axis_edges() {
        assert_eq!(sample_axis(-0.01, 4, EdgeMode::Background), None);
        assert_eq!(sample_axis(3.99, 4, EdgeMode::Background), Some(3));
        assert_eq!(sample_axis(4.0, 4, EdgeMode::Background), None);
        assert_eq!(sample_axis(-0.5, 4, EdgeMode::Wrap), Some(3));
        assert_eq!(sample_axis(f32::NAN, 4, EdgeMode::Wrap), None);
    }
}
