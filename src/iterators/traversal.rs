use glam::{IVec2, Vec2};

use crate::grid::OccupancyGrid;
use crate::types::{BoundaryAxis, GridCoord};

/// Lazy DDA walk over the cells a ray enters, in order.
///
/// Each item is a cell entered by crossing one grid line. The walk ends after
/// yielding the first wall cell, after `max_steps` items, or when the next
/// crossing would lie beyond `max_distance`. The starting cell is never
/// yielded or tested.
pub struct Traversal<'a> {
    grid: &'a OccupancyGrid,
    /// Unit direction of the ray.
    dir: Vec2,
    /// Current cell being processed.
    cell: IVec2,
    x: AxisState,
    y: AxisState,
    max_steps: u32,
    max_distance: f32,
    taken: u32,
    hit: Option<TraversalStep>,
    finished: bool,
}

/// One cell entered during a traversal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TraversalStep {
    pub cell: GridCoord,
    /// Grid line family crossed to enter `cell`.
    pub boundary_axis: BoundaryAxis,
    /// Ray parameter (cell units from the origin) at the crossing.
    pub distance: f32,
}

/// Per-axis stepping state.
///
/// `unit` and `next` are `None` when the ray is parallel to this axis' grid
/// lines and never crosses one.
#[derive(Debug, Copy, Clone)]
struct AxisState {
    step: i32,
    /// Ray parameter needed to cross one whole cell on this axis.
    unit: Option<f32>,
    /// Ray parameter of the next line crossing on this axis.
    next: Option<f32>,
}

impl AxisState {
    fn new(start: f32, cell: i32, dir: f32) -> Self {
        if dir == 0.0 {
            return Self {
                step: 0,
                unit: None,
                next: None,
            };
        }

        let unit = (1.0 / dir).abs();
        let (step, dist_to_boundary) = if dir < 0.0 {
            (-1, start - cell as f32)
        } else {
            (1, cell as f32 + 1.0 - start)
        };

        Self {
            step,
            unit: Some(unit),
            next: Some(dist_to_boundary * unit),
        }
    }

    fn advance(&mut self) {
        if let (Some(next), Some(unit)) = (self.next, self.unit) {
            self.next = Some(next + unit);
        }
    }
}

impl<'a> Traversal<'a> {
    /// Arguments are assumed validated: finite positions, `max_steps >= 1`.
    pub(crate) fn new(
        grid: &'a OccupancyGrid,
        from: Vec2,
        to: Vec2,
        max_steps: u32,
        max_distance: f32,
    ) -> Self {
        let start = GridCoord::floor(from);
        let cell = IVec2::from(start);

        // `try_normalize` also rejects differences too small to normalise.
        let Some(dir) = (to - from).try_normalize() else {
            return Self {
                grid,
                dir: Vec2::ZERO,
                cell,
                x: AxisState::new(from.x, cell.x, 0.0),
                y: AxisState::new(from.y, cell.y, 0.0),
                max_steps,
                max_distance,
                taken: 0,
                hit: None,
                finished: true,
            };
        };

        Self {
            grid,
            dir,
            cell,
            x: AxisState::new(from.x, cell.x, dir.x),
            y: AxisState::new(from.y, cell.y, dir.y),
            max_steps,
            max_distance,
            taken: 0,
            hit: None,
            finished: false,
        }
    }

    /// Unit direction of the ray, or zero for a degenerate ray.
    pub fn direction(&self) -> Vec2 {
        self.dir
    }

    /// The wall cell that ended the walk, once it has been yielded.
    pub fn hit(&self) -> Option<TraversalStep> {
        self.hit
    }

    /// Number of cells yielded so far.
    pub fn steps_taken(&self) -> u32 {
        self.taken
    }

    /// Axis of the next crossing and its ray parameter.
    ///
    /// An x-step is taken only when its crossing is strictly closer; ties and
    /// a ray parallel to the y axis both step in y.
    fn next_crossing(&self) -> Option<(BoundaryAxis, f32)> {
        match (self.x.next, self.y.next) {
            (Some(tx), Some(ty)) if tx < ty => Some((BoundaryAxis::Column, tx)),
            (_, Some(ty)) => Some((BoundaryAxis::Row, ty)),
            (Some(tx), None) => Some((BoundaryAxis::Column, tx)),
            (None, None) => None,
        }
    }
}

impl Iterator for Traversal<'_> {
    type Item = TraversalStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.taken >= self.max_steps {
            self.finished = true;
            return None;
        }

        let Some((axis, distance)) = self.next_crossing() else {
            self.finished = true;
            return None;
        };
        if distance > self.max_distance {
            self.finished = true;
            return None;
        }

        // Starts far outside i32 range saturate in `GridCoord::floor`; the walk
        // ends rather than stepping past the representable cells.
        let moved = match axis {
            BoundaryAxis::Column => self.cell.x.checked_add(self.x.step).map(|x| {
                self.x.advance();
                IVec2::new(x, self.cell.y)
            }),
            BoundaryAxis::Row => self.cell.y.checked_add(self.y.step).map(|y| {
                self.y.advance();
                IVec2::new(self.cell.x, y)
            }),
        };
        let Some(cell) = moved else {
            self.finished = true;
            return None;
        };
        self.cell = cell;
        self.taken += 1;

        let step = TraversalStep {
            cell: self.cell.into(),
            boundary_axis: axis,
            distance,
        };
        if self.grid.get(step.cell).is_wall() {
            self.hit = Some(step);
            self.finished = true;
        }

        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::types::CellState;

    fn empty_grid(dimension: u32) -> OccupancyGrid {
        OccupancyGrid::new(dimension).expect("grid should build")
    }

    #[test]
    fn first_crossings_are_scaled_boundary_distances() {
        let grid = empty_grid(10);
        let mut walk = Traversal::new(&grid, Vec2::new(1.5, 1.25), Vec2::new(9.5, 1.25), 8, 100.0);

        let first = walk.next().expect("first step");
        assert_eq!(first.cell, GridCoord::new(2, 1));
        assert_eq!(first.boundary_axis, BoundaryAxis::Column);
        assert_relative_eq!(first.distance, 0.5, epsilon = 1e-6);

        let second = walk.next().expect("second step");
        assert_eq!(second.cell, GridCoord::new(3, 1));
        assert_relative_eq!(second.distance, 1.5, epsilon = 1e-6);
    }

    #[test]
    fn negative_direction_on_boundary_steps_immediately() {
        let grid = empty_grid(10);
        let mut walk = Traversal::new(&grid, Vec2::new(3.0, 4.5), Vec2::new(0.5, 4.5), 8, 100.0);

        let first = walk.next().expect("first step");
        assert_eq!(first.cell, GridCoord::new(2, 4));
        assert_relative_eq!(first.distance, 0.0);
    }

    #[test]
    fn stops_after_wall() {
        let mut grid = empty_grid(10);
        grid.set(GridCoord::new(4, 2), CellState::Wall);
        let mut walk = Traversal::new(&grid, Vec2::new(1.5, 2.5), Vec2::new(8.5, 2.5), 64, 100.0);

        let cells: Vec<GridCoord> = walk.by_ref().map(|s| s.cell).collect();
        assert_eq!(
            cells,
            vec![GridCoord::new(2, 2), GridCoord::new(3, 2), GridCoord::new(4, 2)]
        );
        let hit = walk.hit().expect("hit expected");
        assert_eq!(hit.cell, GridCoord::new(4, 2));
        assert!(walk.next().is_none());
    }

    #[test]
    fn respects_step_budget() {
        let grid = empty_grid(10);
        let walk = Traversal::new(&grid, Vec2::new(0.5, 0.5), Vec2::new(9.5, 7.0), 5, 100.0);
        assert_eq!(walk.count(), 5);
    }

    #[test]
    fn respects_distance_cap() {
        let grid = empty_grid(10);
        let walk = Traversal::new(&grid, Vec2::new(0.5, 0.5), Vec2::new(0.5, 9.5), 1000, 3.0);
        let steps: Vec<TraversalStep> = walk.collect();
        assert_eq!(steps.len(), 3);
        assert!(steps.iter().all(|s| s.distance <= 3.0));
    }

    #[test]
    fn degenerate_ray_yields_nothing() {
        let grid = empty_grid(10);
        let p = Vec2::new(2.5, 2.5);
        let mut walk = Traversal::new(&grid, p, p, 10, 100.0);
        assert!(walk.next().is_none());
        assert_eq!(walk.direction(), Vec2::ZERO);
        assert!(walk.hit().is_none());
    }

    #[test]
    fn saturated_start_ends_walk() {
        let grid = empty_grid(10);
        let mut walk = Traversal::new(&grid, Vec2::new(3.0e9, 0.5), Vec2::new(4.0e9, 0.5), 4, 100.0);
        assert!(walk.next().is_none());
        assert_eq!(walk.steps_taken(), 0);
    }
}
