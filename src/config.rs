//! Scene configuration loaded from YAML.
//!
//! ```yaml
//! grid_count: 10
//! player: [1.0, 1.0]
//! target: [9.0, 9.0]
//! max_steps: 256
//! max_distance: 100.0
//! walls:
//!   - [4, 4]
//!   - [4, 5]
//! ```
//!
//! A `layout` of `#`/`.` rows may replace `grid_count`; `walls` are applied on top.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::grid::OccupancyGrid;
use crate::raycast::RayCaster;
use crate::scene::{Scene, default_player, default_target};
use crate::types::{
    CellState, DEFAULT_GRID_COUNT, DEFAULT_MAX_DISTANCE, DEFAULT_MAX_STEPS, DdaError, GridCoord,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_grid_count")]
    pub grid_count: u32,

    /// Player position in cell units. Defaults to (1, 1).
    #[serde(default)]
    pub player: Option<[f32; 2]>,

    /// Target position in cell units. Defaults to the far corner cell.
    #[serde(default)]
    pub target: Option<[f32; 2]>,

    #[serde(default = "default_max_steps")]
    pub max_steps: u32,

    /// Traversal distance cap in cell units.
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,

    #[serde(default)]
    pub walls: Vec<[i32; 2]>,

    /// ASCII rows, `#` for wall and `.` for empty. Overrides `grid_count`.
    #[serde(default)]
    pub layout: Option<Vec<String>>,
}

fn default_grid_count() -> u32 {
    DEFAULT_GRID_COUNT
}

fn default_max_steps() -> u32 {
    DEFAULT_MAX_STEPS
}

fn default_max_distance() -> f32 {
    DEFAULT_MAX_DISTANCE
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            grid_count: DEFAULT_GRID_COUNT,
            player: None,
            target: None,
            max_steps: DEFAULT_MAX_STEPS,
            max_distance: DEFAULT_MAX_DISTANCE,
            walls: Vec::new(),
            layout: None,
        }
    }
}

impl SceneConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DdaError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        log::debug!("loaded scene config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, DdaError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Validate the config and build the scene it describes.
    pub fn into_scene(self) -> Result<Scene, DdaError> {
        let mut grid = match &self.layout {
            Some(rows) => OccupancyGrid::from_layout(rows.as_slice())?,
            None => OccupancyGrid::new(self.grid_count)?,
        };

        for wall in &self.walls {
            let cell = GridCoord::from(*wall);
            if !grid.contains(cell) {
                return Err(DdaError::InvalidLayout(format!(
                    "wall ({}, {}) lies outside the {2}x{2} grid",
                    cell.x,
                    cell.y,
                    grid.dimension()
                )));
            }
            grid.set(cell, CellState::Wall);
        }

        let player = self.player.map(Vec2::from).unwrap_or_else(default_player);
        let target = self
            .target
            .map(Vec2::from)
            .unwrap_or_else(|| default_target(grid.dimension()));
        let caster = RayCaster::with_max_distance(self.max_distance)?;

        log::debug!(
            "scene: {0}x{0} grid, {1} walls, player {player}, target {target}",
            grid.dimension(),
            grid.wall_count()
        );
        Scene::new(grid, player, target, self.max_steps, caster)
    }
}
