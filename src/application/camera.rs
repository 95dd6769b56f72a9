use crate::error::ResizeError;

/// Camera maps viewport pixels onto grid (world) coordinates.
///
/// One world unit is one cell. At zoom 1 with zero offset the whole grid
/// fills the viewport; `viewport_scale` is screen pixels per world unit at
/// zoom 1 and must be refreshed through `on_resize` when the viewport changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    zoom: f32,
    offset_x: f32,
    offset_y: f32,
    scale_x: f32,
    scale_y: f32,
    viewport_width: f32,
    viewport_height: f32,
    grid_width: f32,
    grid_height: f32,
    zoom_min: f32,
    zoom_max: f32,
}

impl Camera {
    /// Camera for a grid of the given size, viewport scale 1:1 until resized
    pub fn new(grid_width: usize, grid_height: usize, zoom_min: f32, zoom_max: f32) -> Self {
        let (grid_width, grid_height) = (grid_width as f32, grid_height as f32);
        Self {
            zoom: 1.0_f32.clamp(zoom_min, zoom_max),
            offset_x: 0.0,
            offset_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            viewport_width: grid_width,
            viewport_height: grid_height,
            grid_width,
            grid_height,
            zoom_min,
            zoom_max,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn offset(&self) -> (f32, f32) {
        (self.offset_x, self.offset_y)
    }

    pub fn viewport_scale(&self) -> (f32, f32) {
        (self.scale_x, self.scale_y)
    }

    pub fn viewport_size(&self) -> (f32, f32) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn zoom_bounds(&self) -> (f32, f32) {
        (self.zoom_min, self.zoom_max)
    }

    /// Screen pixels per world unit at the current zoom
    fn pixels_per_unit(&self) -> (f32, f32) {
        (self.zoom * self.scale_x, self.zoom * self.scale_y)
    }

    /// Recompute the viewport scale for a new viewport size.
    /// Invalid sizes are rejected and leave the camera unchanged.
    pub fn on_resize(
        &mut self,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Result<(), ResizeError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(viewport_width) || !valid(viewport_height) {
            return Err(ResizeError::InvalidViewport {
                width: viewport_width,
                height: viewport_height,
            });
        }
        self.viewport_width = viewport_width;
        self.viewport_height = viewport_height;
        self.scale_x = viewport_width / self.grid_width;
        self.scale_y = viewport_height / self.grid_height;
        Ok(())
    }

    /// Convert screen coordinates to world coordinates
    pub fn screen_to_world(&self, px: f32, py: f32) -> (f32, f32) {
        let (ux, uy) = self.pixels_per_unit();
        (px / ux + self.offset_x, py / uy + self.offset_y)
    }

    /// Convert world coordinates to screen coordinates
    pub fn world_to_screen(&self, wx: f32, wy: f32) -> (f32, f32) {
        let (ux, uy) = self.pixels_per_unit();
        ((wx - self.offset_x) * ux, (wy - self.offset_y) * uy)
    }

    /// Move the view by a screen-space drag; the world distance covered
    /// shrinks as the zoom grows.
    pub fn pan(&mut self, dx_screen: f32, dy_screen: f32) {
        if !(dx_screen.is_finite() && dy_screen.is_finite()) {
            return;
        }
        let (ux, uy) = self.pixels_per_unit();
        self.offset_x -= dx_screen / ux;
        self.offset_y -= dy_screen / uy;
    }

    /// Zoom by `multiplier` keeping the world point under (px, py) fixed.
    /// A non-finite anchor or a NaN multiplier leaves the camera untouched.
    pub fn zoom_at(&mut self, px: f32, py: f32, multiplier: f32) {
        if !(px.is_finite() && py.is_finite()) || multiplier.is_nan() {
            return;
        }
        let (world_x, world_y) = self.screen_to_world(px, py);

        self.zoom = (self.zoom * multiplier).clamp(self.zoom_min, self.zoom_max);

        let (ux, uy) = self.pixels_per_unit();
        self.offset_x = world_x - px / ux;
        self.offset_y = world_y - py / uy;
    }

    /// World rectangle covered by the viewport: (min_x, min_y, max_x, max_y)
    pub fn visible_world_rect(&self) -> (f32, f32, f32, f32) {
        let (min_x, min_y) = self.screen_to_world(0.0, 0.0);
        let (max_x, max_y) = self.screen_to_world(self.viewport_width, self.viewport_height);
        (min_x, min_y, max_x, max_y)
    }

    /// Reset zoom and offset, keeping the viewport scale
    pub fn reset(&mut self) {
        self.zoom = 1.0_f32.clamp(self.zoom_min, self.zoom_max);
        self.offset_x = 0.0;
        self.offset_y = 0.0;
    }
}
