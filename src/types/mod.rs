pub mod constants;
pub mod error;
pub mod geometry;

pub use constants::*;
pub use error::DdaError;
pub use geometry::{BoundaryAxis, CellState, GridCoord};
