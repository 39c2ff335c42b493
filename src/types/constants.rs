/// Default number of cells along each side of the grid.
pub const DEFAULT_GRID_COUNT: u32 = 10;

/// Largest accepted grid side. Keeps cell indices well inside `i32`.
pub const MAX_GRID_DIMENSION: u32 = 4096;

/// Distance cap (cell units) beyond which a traversal stops looking for walls.
pub const DEFAULT_MAX_DISTANCE: f32 = 100.0;

/// Default step budget for a single cast. Large enough that the distance cap
/// is the binding limit on a small grid.
pub const DEFAULT_MAX_STEPS: u32 = 256;

/// Marker radius as a fraction of a cell's width.
pub const MARKER_RADIUS_FRACTION: f32 = 1.0 / 6.0;
