use crate::types::{CellState, DdaError, GridCoord, MAX_GRID_DIMENSION};

/// Square occupancy field of `dimension x dimension` cells, stored row-major.
///
/// Reads outside the grid return [`CellState::Empty`] and writes outside the
/// grid are ignored, so the grid is never resized implicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid {
    dimension: u32,
    data: Vec<CellState>,
}

impl OccupancyGrid {
    pub fn new(dimension: u32) -> Result<Self, DdaError> {
        if dimension == 0 {
            return Err(DdaError::InvalidArgument(
                "grid dimension must be at least 1".to_string(),
            ));
        }
        if dimension > MAX_GRID_DIMENSION {
            return Err(DdaError::InvalidArgument(format!(
                "grid dimension {dimension} exceeds {MAX_GRID_DIMENSION}"
            )));
        }
        let len = (dimension as usize) * (dimension as usize);
        Ok(Self {
            dimension,
            data: vec![CellState::Empty; len],
        })
    }

    /// Build a grid from ASCII rows: `#` is a wall, `.` is empty.
    ///
    /// Row 0 is the first string. Rows must form a square.
    pub fn from_layout<S: AsRef<str>>(rows: &[S]) -> Result<Self, DdaError> {
        let dimension = rows.len();
        if dimension == 0 || dimension > MAX_GRID_DIMENSION as usize {
            return Err(DdaError::InvalidLayout(format!(
                "layout has {dimension} rows, expected 1..={MAX_GRID_DIMENSION}"
            )));
        }
        let mut grid = Self::new(dimension as u32)?;

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref().trim();
            let width = row.chars().count();
            if width != dimension {
                return Err(DdaError::InvalidLayout(format!(
                    "row {y} has {width} cells, expected {dimension}"
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                let state = match ch {
                    '#' => CellState::Wall,
                    '.' => CellState::Empty,
                    other => {
                        return Err(DdaError::InvalidLayout(format!(
                            "unexpected character {other:?} at ({x}, {y})"
                        )));
                    }
                };
                grid.set(GridCoord::new(x as i32, y as i32), state);
            }
        }

        Ok(grid)
    }

    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        // Negative indices wrap to large u32 values and fail the comparison.
        (coord.x as u32) < self.dimension && (coord.y as u32) < self.dimension
    }

    #[inline]
    pub fn get(&self, coord: GridCoord) -> CellState {
        match self.index(coord) {
            Some(idx) => self.data[idx],
            None => CellState::Empty,
        }
    }

    pub fn set(&mut self, coord: GridCoord, state: CellState) {
        if let Some(idx) = self.index(coord) {
            self.data[idx] = state;
        }
    }

    /// Flip the cell between empty and wall. Out-of-range cells are ignored.
    pub fn toggle(&mut self, coord: GridCoord) {
        if let Some(idx) = self.index(coord) {
            self.data[idx] = self.data[idx].toggled();
        }
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.data.fill(CellState::Empty);
    }

    pub fn wall_count(&self) -> usize {
        self.data.iter().filter(|cell| cell.is_wall()).count()
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, CellState)> + '_ {
        let dimension = self.dimension as usize;
        self.data.iter().enumerate().map(move |(idx, state)| {
            let coord = GridCoord::new((idx % dimension) as i32, (idx / dimension) as i32);
            (coord, *state)
        })
    }

    fn index(&self, coord: GridCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        Some((coord.y as usize) * (self.dimension as usize) + (coord.x as usize))
    }
}
