use lifegrid_common::{CellCoord, GridDims};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cell::Cell;
use crate::patterns::Pattern;
use crate::rules;

/// Errors from grid construction.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    #[error("grid dimensions must be positive, got {rows}x{columns}")]
    InvalidDimension { rows: usize, columns: usize },
    #[error("unknown pattern {0:?}")]
    UnknownPattern(String),
    #[error("pattern {name} needs {height}x{width} cells but the grid is {dims}")]
    PatternTooLarge {
        name: &'static str,
        height: usize,
        width: usize,
        dims: GridDims,
    },
}

/// Moore neighborhood offsets, `(dx, dy)`.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, 0),
    (1, 0),
    (0, 1),
    (0, -1),
    (-1, 1),
    (1, 1),
    (-1, -1),
    (1, -1),
];

/// The authoritative cell state of one simulation.
///
/// Cells are stored row-major (`x * columns + y`) in construction order and
/// are only ever mutated by [`Grid::advance`]. Both axes wrap, so the grid is
/// a torus: the last row neighbors the first, the last column the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: GridDims,
    cells: Vec<Cell>,
    seed: u64,
}

impl Grid {
    /// Build a randomly populated grid.
    ///
    /// Each cell draws a uniform sample in `[0, 1)` from an RNG seeded with
    /// `rng_seed` and starts alive when the sample is below `live_threshold`.
    /// The same arguments always produce the same grid.
    pub fn new(
        rows: usize,
        columns: usize,
        live_threshold: f64,
        rng_seed: u64,
    ) -> Result<Self, KernelError> {
        let dims = checked_dims(rows, columns)?;
        let mut rng = StdRng::seed_from_u64(rng_seed);

        let mut cells = Vec::with_capacity(dims.area());
        for x in 0..rows {
            for y in 0..columns {
                let alive = rng.r#gen::<f64>() < live_threshold;
                cells.push(Cell::new(x, y, alive));
            }
        }

        let grid = Self {
            dims,
            cells,
            seed: rng_seed,
        };
        tracing::debug!(
            %dims,
            seed = rng_seed,
            live_threshold,
            population = grid.population(),
            "grid seeded"
        );
        Ok(grid)
    }

    /// Build an all-dead grid.
    pub fn empty(rows: usize, columns: usize) -> Result<Self, KernelError> {
        Self::from_live_cells(rows, columns, std::iter::empty())
    }

    /// Build a grid where exactly the given cells are alive.
    ///
    /// Coordinates are wrapped onto the torus, so `(-1, 0)` names the last row.
    pub fn from_live_cells(
        rows: usize,
        columns: usize,
        live: impl IntoIterator<Item = (i64, i64)>,
    ) -> Result<Self, KernelError> {
        let dims = checked_dims(rows, columns)?;
        let mut cells: Vec<Cell> = (0..rows)
            .flat_map(|x| (0..columns).map(move |y| Cell::new(x, y, false)))
            .collect();

        for (x, y) in live {
            let coord = dims.wrap(x, y);
            let idx = coord.x * columns + coord.y;
            cells[idx] = Cell::new(coord.x, coord.y, true);
        }

        Ok(Self {
            dims,
            cells,
            seed: 0,
        })
    }

    /// Build a grid holding `pattern` centred on a dead background.
    pub fn from_pattern(
        rows: usize,
        columns: usize,
        pattern: &Pattern,
    ) -> Result<Self, KernelError> {
        let dims = checked_dims(rows, columns)?;
        let (height, width) = (pattern.height(), pattern.width());
        if height > rows || width > columns {
            return Err(KernelError::PatternTooLarge {
                name: pattern.name,
                height,
                width,
                dims,
            });
        }

        let off_x = ((rows - height) / 2) as i64;
        let off_y = ((columns - width) / 2) as i64;
        let live = pattern
            .cells
            .iter()
            .map(|&(x, y)| (x as i64 + off_x, y as i64 + off_y));
        Self::from_live_cells(rows, columns, live)
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn columns(&self) -> usize {
        self.dims.columns
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Seed the grid was built from (`0` for explicitly constructed grids).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.dims
            .index_of(CellCoord::new(x, y))
            .map(|idx| &self.cells[idx])
    }

    /// Current state of `(x, y)`; out-of-range coordinates read as dead.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some_and(Cell::is_alive)
    }

    /// Coordinates of live cells in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells
            .iter()
            .filter(|c| c.is_alive())
            .map(Cell::coord)
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Count live cells in the toroidal Moore neighborhood of `(x, y)`.
    ///
    /// Reads only the current generation. Each of the eight offsets is
    /// counted on its own, so on an axis of length 1 or 2 the same cell can
    /// be seen more than once. The result is always in `[0, 8]`.
    pub fn live_neighbor_count(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let n = self.dims.wrap(x as i64 + dx, y as i64 + dy);
            if self.cells[n.x * self.dims.columns + n.y].is_alive() {
                count += 1;
            }
        }
        count
    }

    /// Advance every cell by one generation.
    ///
    /// Evaluation stages each cell's next state from the untouched current
    /// generation; only then are all staged states committed.
    pub fn advance(&mut self) {
        for idx in 0..self.cells.len() {
            let cell = self.cells[idx];
            let neighbors = self.live_neighbor_count(cell.x(), cell.y());
            self.cells[idx].stage(rules::next_state(cell.is_alive(), neighbors));
        }

        for cell in &mut self.cells {
            cell.commit();
        }

        tracing::trace!(population = self.population(), "generation advanced");
    }

    /// Deterministic hash of dimensions and live cells.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &(self.dims.rows as u64).to_le_bytes());
        mix(&mut h, &(self.dims.columns as u64).to_le_bytes());
        for chunk in self.cells.chunks(8) {
            let byte = chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, c)| acc | ((c.is_alive() as u8) << i));
            mix(&mut h, &[byte]);
        }
        h
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.dims.columns) {
            for cell in row {
                f.write_str(if cell.is_alive() { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn checked_dims(rows: usize, columns: usize) -> Result<GridDims, KernelError> {
    let dims = GridDims::new(rows, columns);
    if dims.is_empty() {
        return Err(KernelError::InvalidDimension { rows, columns });
    }
    Ok(dims)
}
