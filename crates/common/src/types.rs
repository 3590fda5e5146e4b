use serde::{Deserialize, Serialize};

/// A cell coordinate on the grid: `x` is the row, `y` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: usize,
    pub y: usize,
}

impl CellCoord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for CellCoord {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// Fixed grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub rows: usize,
    pub columns: usize,
}

impl GridDims {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.rows * self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    /// Row-major index of an in-range coordinate.
    pub fn index_of(&self, coord: CellCoord) -> Option<usize> {
        (coord.x < self.rows && coord.y < self.columns).then(|| coord.x * self.columns + coord.y)
    }

    /// Wrap a signed coordinate onto the torus.
    pub fn wrap(&self, x: i64, y: i64) -> CellCoord {
        CellCoord {
            x: x.rem_euclid(self.rows as i64) as usize,
            y: y.rem_euclid(self.columns as i64) as usize,
        }
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self {
            rows: 10,
            columns: 10,
        }
    }
}

impl std::fmt::Display for GridDims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}
