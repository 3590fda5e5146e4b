use glam::Vec2;

/// Placement of one grid cell in normalized device coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellQuad {
    /// Lower-left corner.
    pub origin: Vec2,
    pub size: Vec2,
}

impl CellQuad {
    /// Upper-right corner.
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    /// Corners counter-clockwise from the lower-left.
    pub fn corners(&self) -> [Vec2; 4] {
        let max = self.max();
        [
            self.origin,
            Vec2::new(max.x, self.origin.y),
            max,
            Vec2::new(self.origin.x, max.y),
        ]
    }
}

/// Map cell `(x, y)` of a `rows x columns` grid onto the `[-1, 1]` viewport.
///
/// The grid tiles the viewport exactly: each cell is `2/rows` by `2/columns`
/// and its lower-left corner sits at `(x/rows * 2 - 1, y/columns * 2 - 1)`.
pub fn cell_quad(x: usize, y: usize, rows: usize, columns: usize) -> CellQuad {
    let (rows, columns) = (rows as f32, columns as f32);
    CellQuad {
        origin: Vec2::new(x as f32 / rows * 2.0 - 1.0, y as f32 / columns * 2.0 - 1.0),
        size: Vec2::new(2.0 / rows, 2.0 / columns),
    }
}
