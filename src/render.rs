//! Software rendering of a scene and its cast into an RGBA frame.
//!
//! Used by the viewer to fill its framebuffer and by [`save_snapshot`] to
//! write PNG previews.

use std::path::Path;

use glam::Vec2;
use image::{Rgba, RgbaImage};

use crate::raycast::Cast;
use crate::scene::Scene;
use crate::types::{BoundaryAxis, CellState, DdaError};
use crate::viewport::Viewport;

pub const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const EMPTY_CELL: Rgba<u8> = Rgba([0x21, 0x21, 0x21, 255]);
pub const WALL_CELL: Rgba<u8> = Rgba([0xf4, 0x43, 0x36, 255]);
pub const CELL_OUTLINE: Rgba<u8> = Rgba([255, 255, 255, 13]);
pub const PLAYER: Rgba<u8> = Rgba([0x36, 0xf4, 0x9b, 255]);
pub const TARGET: Rgba<u8> = Rgba([0x36, 0x98, 0xf4, 255]);
pub const COLUMN_STEP: Rgba<u8> = Rgba([0x00, 0xff, 0x00, 0x4b]);
pub const ROW_STEP: Rgba<u8> = Rgba([0x00, 0x00, 0xff, 0x4b]);
pub const HIT_STEP: Rgba<u8> = Rgba([0xff, 0x00, 0xff, 0x4b]);
pub const TRACE_PATH: Rgba<u8> = Rgba([0xff, 0xc0, 0xcb, 255]);
pub const SIGHT_LINE: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 255]);
pub const ROW_HIT: Rgba<u8> = Rgba([0xff, 0xff, 0x00, 255]);
pub const COLUMN_HIT: Rgba<u8> = Rgba([0xff, 0xae, 0x00, 255]);

/// Dash pattern as (on, off) pixel lengths.
const TRACE_DASH: (f32, f32) = (15.0, 15.0);
const SIGHT_DASH: (f32, f32) = (5.0, 5.0);

/// Draw the grid, the traversal trace, both markers and the hit marker.
pub fn render_scene(scene: &Scene, cast: &Cast, viewport: &Viewport) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(viewport.width_px(), viewport.height_px(), BACKGROUND);
    let cell_size = viewport.cell_size();
    let marker_radius = viewport.marker_radius_px();

    for (coord, state) in scene.grid().iter() {
        let min = viewport.cells_to_pixel(coord.to_continuous());
        let fill = match state {
            CellState::Empty => EMPTY_CELL,
            CellState::Wall => WALL_CELL,
        };
        fill_rect(&mut img, min, cell_size, fill);
        stroke_rect(&mut img, min, cell_size, CELL_OUTLINE);
    }

    // Step markers sit on the corner of the entered cell.
    let step_radius = marker_radius / 4.0;
    for step in &cast.trace {
        let center = viewport.cells_to_pixel(step.cell.to_continuous());
        let color = match step.boundary_axis {
            BoundaryAxis::Column => COLUMN_STEP,
            BoundaryAxis::Row => ROW_STEP,
        };
        fill_circle(&mut img, center, step_radius, color);
    }
    if let Some(hit) = cast.result {
        let center = viewport.cells_to_pixel(hit.cell.to_continuous());
        fill_circle(&mut img, center, step_radius, HIT_STEP);
    }

    let mut path = Vec::with_capacity(cast.trace.len() + 1);
    path.push(viewport.cells_to_pixel(scene.player()));
    path.extend(
        cast.trace
            .iter()
            .map(|step| viewport.cells_to_pixel(step.cell.to_continuous())),
    );
    dashed_polyline(&mut img, &path, TRACE_DASH, TRACE_PATH);

    let player = viewport.cells_to_pixel(scene.player());
    let target = viewport.cells_to_pixel(scene.target());
    dashed_polyline(&mut img, &[player, target], SIGHT_DASH, SIGHT_LINE);

    fill_circle(&mut img, player, marker_radius, PLAYER);
    fill_circle(&mut img, target, marker_radius, TARGET);

    if let Some(hit) = cast.result {
        let size = marker_radius / 2.0;
        let corner = viewport.cells_to_pixel(hit.point) - Vec2::splat(size);
        let (extent, color) = match hit.boundary_axis {
            BoundaryAxis::Row => (Vec2::new(size * 2.0, size), ROW_HIT),
            BoundaryAxis::Column => (Vec2::new(size, size * 2.0), COLUMN_HIT),
        };
        fill_rect(&mut img, corner, extent, color);
    }

    img
}

pub fn save_snapshot(img: &RgbaImage, path: impl AsRef<Path>) -> Result<(), DdaError> {
    let path = path.as_ref();
    img.save(path)?;
    log::info!("saved snapshot to {}", path.display());
    Ok(())
}

/// Source-over blend of `src` onto the pixel at (x, y). Off-image pixels are skipped.
fn blend(img: &mut RgbaImage, x: i64, y: i64, src: Rgba<u8>) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }
    let dst = img.get_pixel_mut(x as u32, y as u32);
    let alpha = src.0[3] as u32;
    if alpha == 255 {
        *dst = src;
        return;
    }
    for channel in 0..3 {
        let s = src.0[channel] as u32;
        let d = dst.0[channel] as u32;
        dst.0[channel] = ((s * alpha + d * (255 - alpha) + 127) / 255) as u8;
    }
    let d_alpha = dst.0[3] as u32;
    dst.0[3] = (alpha + d_alpha * (255 - alpha) / 255).min(255) as u8;
}

fn fill_rect(img: &mut RgbaImage, min: Vec2, size: Vec2, color: Rgba<u8>) {
    let x0 = min.x.round() as i64;
    let y0 = min.y.round() as i64;
    let x1 = (min.x + size.x).round() as i64;
    let y1 = (min.y + size.y).round() as i64;
    for y in y0..y1 {
        for x in x0..x1 {
            blend(img, x, y, color);
        }
    }
}

fn stroke_rect(img: &mut RgbaImage, min: Vec2, size: Vec2, color: Rgba<u8>) {
    let x0 = min.x.round() as i64;
    let y0 = min.y.round() as i64;
    let x1 = (min.x + size.x).round() as i64 - 1;
    let y1 = (min.y + size.y).round() as i64 - 1;
    for x in x0..=x1 {
        blend(img, x, y0, color);
        if y1 != y0 {
            blend(img, x, y1, color);
        }
    }
    for y in (y0 + 1)..y1 {
        blend(img, x0, y, color);
        if x1 != x0 {
            blend(img, x1, y, color);
        }
    }
}

fn fill_circle(img: &mut RgbaImage, center: Vec2, radius: f32, color: Rgba<u8>) {
    if radius <= 0.0 {
        return;
    }
    let r2 = radius * radius;
    let x0 = (center.x - radius).floor() as i64;
    let x1 = (center.x + radius).ceil() as i64;
    let y0 = (center.y - radius).floor() as i64;
    let y1 = (center.y + radius).ceil() as i64;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let offset = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
            if offset.length_squared() <= r2 {
                blend(img, x, y, color);
            }
        }
    }
}

/// One-pixel dashed polyline. The dash phase carries across vertices.
fn dashed_polyline(img: &mut RgbaImage, points: &[Vec2], (on, off): (f32, f32), color: Rgba<u8>) {
    let period = on + off;
    let mut phase = 0.0_f32;
    for segment in points.windows(2) {
        let (a, b) = (segment[0], segment[1]);
        let length = a.distance(b);
        if length == 0.0 {
            continue;
        }
        let dir = (b - a) / length;
        let mut t = 0.0;
        while t < length {
            if (phase + t) % period < on {
                let p = a + dir * t;
                blend(img, p.x.floor() as i64, p.y.floor() as i64, color);
            }
            t += 0.5;
        }
        phase = (phase + length) % period;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GridCoord;

    fn pixel(img: &RgbaImage, p: Vec2) -> Rgba<u8> {
        *img.get_pixel(p.x as u32, p.y as u32)
    }

    #[test]
    fn cells_use_occupancy_colors() {
        let mut scene = Scene::with_dimension(10).unwrap();
        scene.grid_mut().set(GridCoord::new(5, 2), crate::types::CellState::Wall);
        let viewport = Viewport::new(200, 200, 10);

        let img = render_scene(&scene, &Cast::default(), &viewport);
        assert_eq!(img.dimensions(), (200, 200));
        // Interior pixels, away from outlines and markers.
        assert_eq!(pixel(&img, Vec2::new(110.0, 50.0)), WALL_CELL);
        assert_eq!(pixel(&img, Vec2::new(130.0, 150.0)), EMPTY_CELL);
    }

    #[test]
    fn markers_are_drawn_at_positions() {
        let scene = Scene::with_dimension(10).unwrap();
        let viewport = Viewport::new(300, 300, 10);
        let img = render_scene(&scene, &Cast::default(), &viewport);

        let player = viewport.cells_to_pixel(scene.player());
        let target = viewport.cells_to_pixel(scene.target());
        assert_eq!(pixel(&img, player), PLAYER);
        assert_eq!(pixel(&img, target), TARGET);
    }

    #[test]
    fn hit_marker_orientation_follows_axis() {
        let mut scene = Scene::with_dimension(10).unwrap();
        scene.set_player(Vec2::new(1.5, 5.5));
        scene.set_target(Vec2::new(8.5, 5.5));
        scene.grid_mut().set(GridCoord::new(6, 5), crate::types::CellState::Wall);
        let viewport = Viewport::new(600, 600, 10);

        let cast = scene.cast().unwrap();
        let hit = cast.result.expect("hit expected");
        assert_eq!(hit.boundary_axis, BoundaryAxis::Column);

        let img = render_scene(&scene, &cast, &viewport);
        let at = viewport.cells_to_pixel(hit.point);
        let size = viewport.marker_radius_px() / 2.0;
        // Column markers are tall: the pixel just above the centre is inside...
        assert_eq!(pixel(&img, at + Vec2::new(-size * 0.5, -size * 0.5)), COLUMN_HIT);
        // ...and the pixel to the right of the centre is not.
        assert_ne!(pixel(&img, at + Vec2::new(size * 0.5, size * 0.5)), COLUMN_HIT);
    }

    #[test]
    fn blend_mixes_translucent_colors() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        blend(&mut img, 0, 0, Rgba([255, 255, 255, 128]));
        let px = img.get_pixel(0, 0);
        assert!(px.0[0] > 120 && px.0[0] < 136);
        assert_eq!(px.0[3], 255);

        // Off-image writes are ignored.
        blend(&mut img, -1, 5, Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn snapshot_writes_png() {
        let scene = Scene::with_dimension(4).unwrap();
        let cast = scene.cast().unwrap();
        let img = render_scene(&scene, &cast, &Viewport::new(64, 64, 4));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        save_snapshot(&img, &path).unwrap();
        assert!(path.exists());
    }
}
