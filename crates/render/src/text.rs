use std::io::Write;

use lifegrid_common::{CellCoord, GridDims};

use crate::renderer::{GraphicsInitError, Renderer};

const LIVE: u8 = b'#';
const DEAD: u8 = b'.';

/// Headless renderer that prints each frame as text.
///
/// Every frame becomes a header line followed by one line per row, `#` for a
/// live cell and `.` for a dead one. Useful for the CLI, logs, and tests.
/// A failed write is logged and turns `should_close` on.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
    dims: GridDims,
    buffer: Vec<u8>,
    live: usize,
    frames: u64,
    frame_limit: Option<u64>,
    initialized: bool,
    failed: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, dims: GridDims) -> Self {
        Self {
            out,
            dims,
            buffer: vec![DEAD; dims.area()],
            live: 0,
            frames: 0,
            frame_limit: None,
            initialized: false,
            failed: false,
        }
    }

    /// Ask to close after `limit` frames have been presented.
    pub fn with_frame_limit(mut self, limit: u64) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self) -> std::io::Result<()> {
        writeln!(
            self.out,
            "--- frame {} ({} live) ---",
            self.frames, self.live
        )?;
        for row in self.buffer.chunks(self.dims.columns) {
            self.out.write_all(row)?;
            self.out.write_all(b"\n")?;
        }
        self.out.flush()
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn init(&mut self, width: u32, height: u32) -> Result<(), GraphicsInitError> {
        if self.initialized {
            return Err(GraphicsInitError::AlreadyInitialized);
        }
        self.initialized = true;
        tracing::info!(
            dims = %self.dims,
            width,
            height,
            "text renderer ready (window size ignored)"
        );
        Ok(())
    }

    fn begin_frame(&mut self) {
        self.buffer.fill(DEAD);
        self.live = 0;
    }

    fn draw_live_cell(&mut self, x: usize, y: usize, rows: usize, columns: usize) {
        debug_assert_eq!(GridDims::new(rows, columns), self.dims);
        match self.dims.index_of(CellCoord::new(x, y)) {
            Some(idx) => {
                self.buffer[idx] = LIVE;
                self.live += 1;
            }
            None => tracing::warn!(x, y, dims = %self.dims, "cell outside text frame"),
        }
    }

    fn end_frame(&mut self) {
        self.frames += 1;
        if self.failed {
            return;
        }
        if let Err(e) = self.write_frame() {
            tracing::error!("failed to write text frame: {e}");
            self.failed = true;
        }
    }

    fn should_close(&self) -> bool {
        self.failed || self.frame_limit.is_some_and(|limit| self.frames >= limit)
    }
}
