use lifegrid_common::{CellCoord, GridDims};
use lifegrid_kernel::Grid;

/// Grid inspector for developer tooling.
///
/// Read-only queries against grid state for debugging, logging and the CLI.
pub struct GridInspector;

impl GridInspector {
    /// Produce a summary of the grid state.
    pub fn summary(grid: &Grid) -> GridSummary {
        let population = grid.population();
        GridSummary {
            dims: grid.dims(),
            seed: grid.seed(),
            population,
            density: population as f64 / grid.dims().area() as f64,
            hash: grid.state_hash(),
        }
    }

    /// Current and staged state of one cell plus its live neighbor count.
    pub fn inspect_cell(grid: &Grid, x: usize, y: usize) -> Option<CellInfo> {
        grid.cell(x, y).map(|cell| CellInfo {
            coord: cell.coord(),
            alive: cell.is_alive(),
            alive_next: cell.alive_next(),
            live_neighbors: grid.live_neighbor_count(x, y),
        })
    }

    /// Smallest rectangle holding every live cell, as `(min, max)` corners.
    ///
    /// Ignores wraparound, so a pattern straddling an edge reports the full span.
    pub fn bounding_box(grid: &Grid) -> Option<(CellCoord, CellCoord)> {
        grid.live_cells().fold(None, |acc, c| {
            Some(match acc {
                None => (c, c),
                Some((lo, hi)) => (
                    CellCoord::new(lo.x.min(c.x), lo.y.min(c.y)),
                    CellCoord::new(hi.x.max(c.x), hi.y.max(c.y)),
                ),
            })
        })
    }
}

/// Summary of grid state for the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSummary {
    pub dims: GridDims,
    pub seed: u64,
    pub population: usize,
    /// Fraction of live cells, in `[0, 1]`.
    pub density: f64,
    pub hash: u64,
}

impl std::fmt::Display for GridSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Grid: {} seed={} population={} density={:.2} hash={:#018x}",
            self.dims, self.seed, self.population, self.density, self.hash
        )
    }
}

/// Detailed info about a single cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellInfo {
    pub coord: CellCoord,
    pub alive: bool,
    pub alive_next: bool,
    pub live_neighbors: u8,
}

impl std::fmt::Display for CellInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cell ({}, {}) alive={} next={} neighbors={}",
            self.coord.x, self.coord.y, self.alive, self.alive_next, self.live_neighbors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_empty_grid() {
        let grid = Grid::empty(4, 5).unwrap();
        let summary = GridInspector::summary(&grid);
        assert_eq!(summary.dims, GridDims::new(4, 5));
        assert_eq!(summary.population, 0);
        assert_eq!(summary.density, 0.0);
    }

    #[test]
    fn summary_seeded_grid() {
        let grid = Grid::new(10, 10, 1.0, 77).unwrap();
        let summary = GridInspector::summary(&grid);
        assert_eq!(summary.seed, 77);
        assert_eq!(summary.population, 100);
        assert_eq!(summary.density, 1.0);
        assert_eq!(summary.hash, grid.state_hash());
    }

    #[test]
    fn inspect_cell_found() {
        let grid = Grid::from_live_cells(5, 5, [(1, 1), (1, 2), (2, 1)]).unwrap();
        let info = GridInspector::inspect_cell(&grid, 2, 2).unwrap();
        assert!(!info.alive);
        assert_eq!(info.live_neighbors, 3);
        assert_eq!(info.coord, CellCoord::new(2, 2));
    }

    #[test]
    fn inspect_cell_out_of_range() {
        let grid = Grid::empty(3, 3).unwrap();
        assert!(GridInspector::inspect_cell(&grid, 3, 0).is_none());
    }

    #[test]
    fn bounding_box_spans_live_cells() {
        let grid = Grid::from_live_cells(8, 8, [(2, 5), (4, 1), (3, 3)]).unwrap();
        assert_eq!(
            GridInspector::bounding_box(&grid),
            Some((CellCoord::new(2, 1), CellCoord::new(4, 5)))
        );
        assert_eq!(GridInspector::bounding_box(&Grid::empty(2, 2).unwrap()), None);
    }

    #[test]
    fn summary_display() {
        let grid = Grid::from_live_cells(2, 2, [(0, 0)]).unwrap();
        let s = GridInspector::summary(&grid).to_string();
        assert!(s.contains("2x2"));
        assert!(s.contains("population=1"));
        assert!(s.contains("density=0.25"));
    }
}
