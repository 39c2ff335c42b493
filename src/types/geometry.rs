//! Coordinate and cell types shared by the grid, the ray caster and the scene.
//!
//! Continuous positions are plain [`glam::Vec2`] values in cell units (one unit
//! per cell side). Discrete cell indices are [`GridCoord`]. The two are never
//! mixed implicitly: go through [`GridCoord::floor`] and
//! [`GridCoord::to_continuous`].

use glam::{IVec2, Vec2};

/// Discrete cell index. May lie outside the grid; the grid decides what that means.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell containing a continuous position.
    #[inline]
    pub fn floor(pos: Vec2) -> Self {
        let cell = pos.floor();
        Self::new(cell.x as i32, cell.y as i32)
    }

    /// Continuous position of the cell's minimum corner.
    #[inline]
    pub fn to_continuous(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    /// Continuous position of the cell's centre.
    #[inline]
    pub fn center(self) -> Vec2 {
        self.to_continuous() + Vec2::splat(0.5)
    }

    /// Chebyshev distance between two cells.
    #[inline]
    pub fn chebyshev(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl From<IVec2> for GridCoord {
    fn from(value: IVec2) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<GridCoord> for IVec2 {
    fn from(value: GridCoord) -> Self {
        IVec2::new(value.x, value.y)
    }
}

impl From<[i32; 2]> for GridCoord {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

/// Occupancy of a single cell.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Empty,
    Wall,
}

impl CellState {
    #[inline]
    pub fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Empty => Self::Wall,
            Self::Wall => Self::Empty,
        }
    }
}

/// Which family of grid lines a traversal step crossed to enter its cell.
///
/// An x-step crosses a vertical line and enters a new column; a y-step crosses
/// a horizontal line and enters a new row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryAxis {
    Row,
    Column,
}
