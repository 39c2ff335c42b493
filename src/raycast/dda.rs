use glam::Vec2;

use crate::grid::OccupancyGrid;
use crate::iterators::Traversal;
use crate::raycast::{Cast, CastResult};
use crate::types::{DEFAULT_MAX_DISTANCE, DdaError};

/// Fast voxel traversal (Amanatides & Woo) from a start point toward a target.
///
/// Holds only its distance cap; every cast is independent.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayCaster {
    max_distance: f32,
}

impl Default for RayCaster {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

impl RayCaster {
    pub fn with_max_distance(max_distance: f32) -> Result<Self, DdaError> {
        if !max_distance.is_finite() || max_distance <= 0.0 {
            return Err(DdaError::InvalidArgument(format!(
                "max distance must be finite and positive, got {max_distance}"
            )));
        }
        Ok(Self { max_distance })
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Lazily walk the cells between `from` and the first wall toward `to`.
    pub fn traverse<'a>(
        &self,
        from: Vec2,
        to: Vec2,
        grid: &'a OccupancyGrid,
        max_steps: u32,
    ) -> Result<Traversal<'a>, DdaError> {
        if max_steps == 0 {
            return Err(DdaError::InvalidArgument(
                "max steps must be at least 1".to_string(),
            ));
        }
        if !from.is_finite() || !to.is_finite() {
            return Err(DdaError::InvalidArgument(format!(
                "ray endpoints must be finite, got {from} -> {to}"
            )));
        }

        Ok(Traversal::new(grid, from, to, max_steps, self.max_distance))
    }

    /// Cast a ray and collect its full trace plus the first wall hit.
    ///
    /// `from == to` yields an empty cast.
    pub fn cast(
        &self,
        from: Vec2,
        to: Vec2,
        grid: &OccupancyGrid,
        max_steps: u32,
    ) -> Result<Cast, DdaError> {
        let mut walk = self.traverse(from, to, grid, max_steps)?;
        let trace: Vec<_> = walk.by_ref().collect();

        let result = walk.hit().map(|hit| CastResult {
            point: from + walk.direction() * hit.distance,
            boundary_axis: hit.boundary_axis,
            distance: hit.distance,
            cell: hit.cell,
        });

        match &result {
            Some(hit) => log::trace!(
                "ray hit {:?} at ({:.3}, {:.3}) after {} steps",
                hit.cell,
                hit.point.x,
                hit.point.y,
                trace.len()
            ),
            None => log::trace!("ray clear after {} steps", trace.len()),
        }

        Ok(Cast { trace, result })
    }
}

/// Cast with the default distance cap.
pub fn cast_ray(
    from: Vec2,
    to: Vec2,
    grid: &OccupancyGrid,
    max_steps: u32,
) -> Result<Cast, DdaError> {
    RayCaster::default().cast(from, to, grid, max_steps)
}
