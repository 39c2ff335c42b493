//! Owned application state and pointer interaction.
//!
//! The scene owns the grid and the two markers. Input handlers mutate it
//! between frames; [`Scene::cast`] reads it once per frame.

use glam::Vec2;

use crate::grid::OccupancyGrid;
use crate::raycast::{Cast, RayCaster};
use crate::types::{CellState, DEFAULT_MAX_STEPS, DdaError, GridCoord};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// What an active drag does on every pointer move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DragMode {
    PaintWall,
    EraseWall,
    MovePlayer,
    MoveTarget,
}

#[derive(Debug, Clone)]
pub struct Scene {
    grid: OccupancyGrid,
    player: Vec2,
    target: Vec2,
    drag: Option<DragMode>,
    max_steps: u32,
    caster: RayCaster,
}

impl Scene {
    pub fn new(
        grid: OccupancyGrid,
        player: Vec2,
        target: Vec2,
        max_steps: u32,
        caster: RayCaster,
    ) -> Result<Self, DdaError> {
        if max_steps == 0 {
            return Err(DdaError::InvalidArgument(
                "max steps must be at least 1".to_string(),
            ));
        }
        if !player.is_finite() || !target.is_finite() {
            return Err(DdaError::InvalidArgument(format!(
                "marker positions must be finite, got player {player} target {target}"
            )));
        }

        Ok(Self {
            grid,
            player,
            target,
            drag: None,
            max_steps,
            caster,
        })
    }

    /// Empty grid with the markers in their default corners.
    pub fn with_dimension(dimension: u32) -> Result<Self, DdaError> {
        let grid = OccupancyGrid::new(dimension)?;
        Self::new(
            grid,
            default_player(),
            default_target(dimension),
            DEFAULT_MAX_STEPS,
            RayCaster::default(),
        )
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut OccupancyGrid {
        &mut self.grid
    }

    pub fn player(&self) -> Vec2 {
        self.player
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn set_player(&mut self, pos: Vec2) {
        if pos.is_finite() {
            self.player = pos;
        }
    }

    pub fn set_target(&mut self, pos: Vec2) {
        if pos.is_finite() {
            self.target = pos;
        }
    }

    pub fn drag(&self) -> Option<DragMode> {
        self.drag
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Start a drag at `pos` (cell units).
    ///
    /// A primary press within `capture_radius` of a marker grabs the closer
    /// marker; a press equally close to both paints instead.
    pub fn pointer_down(&mut self, pos: Vec2, button: PointerButton, capture_radius: f32) {
        let mode = match button {
            PointerButton::Primary => {
                let to_player = pos.distance(self.player);
                let to_target = pos.distance(self.target);
                if to_player <= capture_radius && to_player < to_target {
                    DragMode::MovePlayer
                } else if to_target <= capture_radius && to_target < to_player {
                    DragMode::MoveTarget
                } else {
                    DragMode::PaintWall
                }
            }
            PointerButton::Secondary => DragMode::EraseWall,
        };

        self.drag = Some(mode);
        self.apply_drag(mode, pos);
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        if let Some(mode) = self.drag {
            self.apply_drag(mode, pos);
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Clear every wall and put the markers back in their default corners.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.player = default_player();
        self.target = default_target(self.grid.dimension());
        self.drag = None;
        log::debug!("scene reset to {0}x{0} empty grid", self.grid.dimension());
    }

    /// Cast from the player toward the target against the current grid.
    pub fn cast(&self) -> Result<Cast, DdaError> {
        self.caster
            .cast(self.player, self.target, &self.grid, self.max_steps)
    }

    fn apply_drag(&mut self, mode: DragMode, pos: Vec2) {
        match mode {
            DragMode::PaintWall => self.grid.set(GridCoord::floor(pos), CellState::Wall),
            DragMode::EraseWall => self.grid.set(GridCoord::floor(pos), CellState::Empty),
            DragMode::MovePlayer => self.set_player(pos),
            DragMode::MoveTarget => self.set_target(pos),
        }
    }
}

pub fn default_player() -> Vec2 {
    Vec2::new(1.0, 1.0)
}

pub fn default_target(dimension: u32) -> Vec2 {
    let far = dimension.saturating_sub(1) as f32;
    Vec2::new(far, far)
}
