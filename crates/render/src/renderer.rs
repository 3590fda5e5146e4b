use lifegrid_kernel::Grid;

/// Failures while bringing up a renderer. All of them are fatal to a run.
#[derive(Debug, thiserror::Error)]
pub enum GraphicsInitError {
    #[error("failed to create event loop: {0}")]
    EventLoop(String),
    #[error("failed to create window: {0}")]
    Window(String),
    #[error("failed to create surface: {0}")]
    Surface(String),
    #[error("no compatible graphics adapter found")]
    NoAdapter,
    #[error("failed to create graphics device: {0}")]
    Device(String),
    #[error("window closed before initialisation finished")]
    ClosedDuringInit,
    #[error("renderer already initialised")]
    AlreadyInitialized,
}

/// Renderer-agnostic interface the simulation loop draws through.
///
/// A frame is `begin_frame`, one `draw_live_cell` per live coordinate, then
/// `end_frame`. Implementations own every graphics resource; the grid only
/// ever hands them coordinates.
pub trait Renderer {
    /// Prepare the output surface. Called once before the first frame.
    fn init(&mut self, width: u32, height: u32) -> Result<(), GraphicsInitError>;

    /// Clear the previous frame.
    fn begin_frame(&mut self);

    /// Draw the cell at `(x, y)` of a `rows x columns` grid.
    fn draw_live_cell(&mut self, x: usize, y: usize, rows: usize, columns: usize);

    /// Present the frame and poll window events.
    fn end_frame(&mut self);

    /// Whether the user or the output asked the run to stop.
    fn should_close(&self) -> bool;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn init(&mut self, width: u32, height: u32) -> Result<(), GraphicsInitError> {
        (**self).init(width, height)
    }

    fn begin_frame(&mut self) {
        (**self).begin_frame();
    }

    fn draw_live_cell(&mut self, x: usize, y: usize, rows: usize, columns: usize) {
        (**self).draw_live_cell(x, y, rows, columns);
    }

    fn end_frame(&mut self) {
        (**self).end_frame();
    }

    fn should_close(&self) -> bool {
        (**self).should_close()
    }
}

/// Draw one full frame of `grid`: every live cell, in row-major order.
pub fn render_grid<R: Renderer + ?Sized>(renderer: &mut R, grid: &Grid) {
    let (rows, columns) = (grid.rows(), grid.columns());
    renderer.begin_frame();
    for coord in grid.live_cells() {
        renderer.draw_live_cell(coord.x, coord.y, rows, columns);
    }
    renderer.end_frame();
}
