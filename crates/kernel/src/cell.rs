use lifegrid_common::CellCoord;

/// One grid cell: its coordinate, current state, and staged next state.
///
/// `alive_next` only becomes visible through [`Cell::commit`], which the grid
/// calls for every cell once the whole generation has been evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    x: usize,
    y: usize,
    alive: bool,
    alive_next: bool,
}

impl Cell {
    pub(crate) fn new(x: usize, y: usize, alive: bool) -> Self {
        Self {
            x,
            y,
            alive,
            alive_next: alive,
        }
    }

    pub fn coord(&self) -> CellCoord {
        CellCoord::new(self.x, self.y)
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    /// State in the current generation.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// State staged for the next generation.
    pub fn alive_next(&self) -> bool {
        self.alive_next
    }

    pub(crate) fn stage(&mut self, next: bool) {
        self.alive_next = next;
    }

    pub(crate) fn commit(&mut self) {
        self.alive = self.alive_next;
    }
}
