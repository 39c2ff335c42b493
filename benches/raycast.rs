use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::Vec2;

use dda_grid::types::{CellState, GridCoord};
use dda_grid::{OccupancyGrid, RayCaster};

const MAX_STEPS: u32 = 256;

fn bench_raycast(c: &mut Criterion) {
    let grid = build_grid(64);
    let empty_grid = OccupancyGrid::new(64).expect("grid should build");
    let early_hit_grid = build_grid_with_wall_column(64, 2);
    let late_hit_grid = build_grid_with_wall_column(64, 62);
    let rays = build_rays();
    let rays_positive_x = build_rays_positive_x();
    let caster = RayCaster::default();

    c.bench_function("cast_hits", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for (from, to) in &rays {
                if let Ok(cast) = caster.cast(*from, *to, &grid, MAX_STEPS) {
                    hits += cast.is_hit() as usize;
                }
            }
            black_box(hits);
        });
    });

    c.bench_function("cast_miss", |b| {
        b.iter(|| {
            let mut steps = 0usize;
            for (from, to) in &rays {
                if let Ok(cast) = caster.cast(*from, *to, &empty_grid, MAX_STEPS) {
                    steps += cast.trace.len();
                }
            }
            black_box(steps);
        });
    });

    c.bench_function("cast_hits_early", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for (from, to) in &rays_positive_x {
                if let Ok(cast) = caster.cast(*from, *to, &early_hit_grid, MAX_STEPS) {
                    hits += cast.is_hit() as usize;
                }
            }
            black_box(hits);
        });
    });

    c.bench_function("cast_hits_late", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for (from, to) in &rays_positive_x {
                if let Ok(cast) = caster.cast(*from, *to, &late_hit_grid, MAX_STEPS) {
                    hits += cast.is_hit() as usize;
                }
            }
            black_box(hits);
        });
    });
}

fn build_grid(dimension: u32) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(dimension).expect("grid should build");
    for y in (0..dimension as i32).step_by(8) {
        for x in (0..dimension as i32).step_by(8) {
            grid.set(GridCoord::new(x, y), CellState::Wall);
        }
    }
    grid
}

fn build_grid_with_wall_column(dimension: u32, column: i32) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(dimension).expect("grid should build");
    for y in 0..dimension as i32 {
        grid.set(GridCoord::new(column, y), CellState::Wall);
    }
    grid
}

fn build_rays() -> Vec<(Vec2, Vec2)> {
    let mut rays = Vec::new();
    for i in 0..64 {
        let from = Vec2::new(1.1, 1.1 + i as f32 * 0.7);
        let to = from + Vec2::new(1.0, (i as f32 * 0.01) - 0.3) * 40.0;
        rays.push((from, to));
    }
    rays.push((Vec2::new(32.0, 32.0), Vec2::new(2.0, 38.0)));
    rays.push((Vec2::new(40.0, 1.0), Vec2::new(48.0, 41.0)));
    rays
}

fn build_rays_positive_x() -> Vec<(Vec2, Vec2)> {
    (0..64)
        .map(|i| {
            let from = Vec2::new(0.5, 0.5 + i as f32 * 0.9);
            (from, from + Vec2::new(60.0, 1.2))
        })
        .collect()
}

criterion_group!(benches, bench_raycast);
criterion_main!(benches);
