use glam::Vec2;

use crate::iterators::TraversalStep;
use crate::types::{BoundaryAxis, GridCoord};

pub mod dda;

pub use dda::{RayCaster, cast_ray};

/// First wall entered by a ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CastResult {
    /// Exact point on the boundary of `cell` where the ray enters it (cell units).
    pub point: Vec2,
    /// Grid line family the point lies on.
    pub boundary_axis: BoundaryAxis,
    /// Distance from the ray origin to `point` (cell units).
    pub distance: f32,
    /// Wall cell that was entered.
    pub cell: GridCoord,
}

/// Everything a single cast produced: the cells visited and the hit, if any.
///
/// An empty trace with no result is a degenerate (zero-length) ray; a
/// non-empty trace with no result means the budget ran out with a clear line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cast {
    pub trace: Vec<TraversalStep>,
    pub result: Option<CastResult>,
}

impl Cast {
    pub fn is_hit(&self) -> bool {
        self.result.is_some()
    }

    /// Last cell visited before the wall, if the ray entered at least one empty cell.
    pub fn last_clear_cell(&self) -> Option<GridCoord> {
        let clear = match self.result {
            Some(_) => self.trace.len().checked_sub(2)?,
            None => self.trace.len().checked_sub(1)?,
        };
        self.trace.get(clear).map(|step| step.cell)
    }
}
