pub mod config;
pub mod grid;
pub mod iterators;
pub mod raycast;
pub mod render;
pub mod scene;
pub mod types;
pub mod viewport;

pub use config::SceneConfig;
pub use grid::OccupancyGrid;
pub use iterators::{Traversal, TraversalStep};
pub use raycast::{Cast, CastResult, RayCaster, cast_ray};
pub use scene::{DragMode, PointerButton, Scene};
pub use types::{BoundaryAxis, CellState, DdaError, GridCoord};
pub use viewport::Viewport;
