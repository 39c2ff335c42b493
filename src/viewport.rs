//! Pixel <-> cell-unit mapping for a window showing the whole grid.

use glam::Vec2;

use crate::types::{GridCoord, MARKER_RADIUS_FRACTION};

/// Window size in pixels and the number of cells stretched across it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    width_px: u32,
    height_px: u32,
    grid_count: u32,
}

impl Viewport {
    /// Zero sizes are clamped to one pixel / one cell.
    pub fn new(width_px: u32, height_px: u32, grid_count: u32) -> Self {
        Self {
            width_px: width_px.max(1),
            height_px: height_px.max(1),
            grid_count: grid_count.max(1),
        }
    }

    pub fn resize(&mut self, width_px: u32, height_px: u32) {
        self.width_px = width_px.max(1);
        self.height_px = height_px.max(1);
    }

    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    pub fn grid_count(&self) -> u32 {
        self.grid_count
    }

    /// Size of one cell in pixels.
    #[inline]
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(
            self.width_px as f32 / self.grid_count as f32,
            self.height_px as f32 / self.grid_count as f32,
        )
    }

    #[inline]
    pub fn pixel_to_cells(&self, px: Vec2) -> Vec2 {
        px / self.cell_size()
    }

    #[inline]
    pub fn pixel_to_cell(&self, px: Vec2) -> GridCoord {
        GridCoord::floor(self.pixel_to_cells(px))
    }

    #[inline]
    pub fn cells_to_pixel(&self, pos: Vec2) -> Vec2 {
        pos * self.cell_size()
    }

    /// Radius of the player/target discs in pixels.
    pub fn marker_radius_px(&self) -> f32 {
        self.cell_size().x * MARKER_RADIUS_FRACTION
    }

    /// Marker grab radius in cell units.
    pub fn capture_radius(&self) -> f32 {
        self.marker_radius_px() / self.cell_size().x
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn maps_pixels_to_cells() {
        let viewport = Viewport::new(800, 600, 10);
        assert_eq!(viewport.cell_size(), Vec2::new(80.0, 60.0));
        assert_eq!(
            viewport.pixel_to_cells(Vec2::new(120.0, 90.0)),
            Vec2::new(1.5, 1.5)
        );
        assert_eq!(
            viewport.pixel_to_cell(Vec2::new(799.0, 0.0)),
            GridCoord::new(9, 0)
        );
        assert_eq!(
            viewport.cells_to_pixel(Vec2::new(1.5, 1.5)),
            Vec2::new(120.0, 90.0)
        );
    }

    #[test]
    fn marker_radius_tracks_cell_width() {
        let mut viewport = Viewport::new(600, 600, 10);
        assert_relative_eq!(viewport.marker_radius_px(), 10.0);
        assert_relative_eq!(viewport.capture_radius(), 1.0 / 6.0);

        viewport.resize(1200, 300);
        assert_relative_eq!(viewport.marker_radius_px(), 20.0);
        assert_relative_eq!(viewport.capture_radius(), 1.0 / 6.0);
    }

    #[test]
    fn clamps_degenerate_sizes() {
        let viewport = Viewport::new(0, 0, 0);
        assert_eq!(viewport.width_px(), 1);
        assert_eq!(viewport.grid_count(), 1);
        assert!(viewport.cell_size().is_finite());
    }
}
