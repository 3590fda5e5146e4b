use std::time::{Duration, Instant};

use lifegrid_common::SimConfig;
use lifegrid_kernel::{Grid, KernelError, patterns};
use lifegrid_render::{GraphicsInitError, Renderer, render_grid};
use lifegrid_tools::CycleDetector;

use crate::timer::TickTimer;

/// Fatal errors of a simulation run.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Kernel(#[from] KernelError),
    #[error("renderer failed to initialise: {0}")]
    Graphics(#[from] GraphicsInitError),
}

/// Lifecycle of a [`SimulationLoop`]: `Idle -> Ticking -> Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Ticking,
    Stopped,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The renderer reported `should_close`.
    CloseRequested,
    /// `max_generations` ticks were issued.
    GenerationLimit,
    /// The grid repeated a recent state and `halt_on_cycle` is set.
    Cycle { period: usize },
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CloseRequested => f.write_str("close requested"),
            Self::GenerationLimit => f.write_str("generation limit reached"),
            Self::Cycle { period } => write!(f, "cycle of period {period}"),
        }
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopStats {
    pub ticks: u64,
    pub population: usize,
    pub stop_reason: Option<StopReason>,
    /// Period of the most recently detected cycle, if any.
    pub cycle_period: Option<usize>,
    pub tick_average: Duration,
    pub tick_max: Duration,
}

/// Fixed-rate loop: advance the grid, draw it, wait for the next tick.
///
/// The loop owns the grid for the whole run and borrows the renderer.
/// Ticks are paced against deadlines: a tick that takes 30 ms of a 200 ms
/// interval sleeps the remaining 170 ms.
pub struct SimulationLoop {
    grid: Grid,
    tick: u64,
    state: LoopState,
    interval: Duration,
    window: (u32, u32),
    max_generations: Option<u64>,
    halt_on_cycle: bool,
    cycles: CycleDetector,
    cycle_period: Option<usize>,
    timer: TickTimer,
    stop_reason: Option<StopReason>,
}

impl SimulationLoop {
    pub fn new(grid: Grid, config: &SimConfig) -> Self {
        Self {
            grid,
            tick: 0,
            state: LoopState::Idle,
            interval: config.tick_interval(),
            window: (config.window_width, config.window_height),
            max_generations: config.max_generations,
            halt_on_cycle: config.halt_on_cycle,
            cycles: CycleDetector::default(),
            cycle_period: None,
            timer: TickTimer::default(),
            stop_reason: None,
        }
    }

    /// Build the starting grid described by `config` and wrap it in a loop.
    ///
    /// A configured pattern wins over random seeding.
    pub fn from_config(config: &SimConfig) -> Result<Self, SimError> {
        let grid = match &config.pattern {
            Some(name) => {
                let pattern = patterns::lookup(name)?;
                tracing::info!(pattern = pattern.name, dims = %config.dims(), "placing pattern");
                Grid::from_pattern(config.rows, config.columns, pattern)?
            }
            None => {
                let seed = config.resolved_seed();
                tracing::info!(seed, dims = %config.dims(), "seeding random grid");
                Grid::new(config.rows, config.columns, config.live_threshold, seed)?
            }
        };
        Ok(Self::new(grid, config))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Generations advanced so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn stats(&self) -> LoopStats {
        LoopStats {
            ticks: self.tick,
            population: self.grid.population(),
            stop_reason: self.stop_reason,
            cycle_period: self.cycle_period,
            tick_average: self.timer.average(),
            tick_max: self.timer.max(),
        }
    }

    /// Initialise the renderer and tick until a stop condition holds.
    ///
    /// A renderer that fails to initialise is fatal and no tick is issued.
    /// Calling `run` on a stopped loop returns its stats unchanged.
    pub fn run<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Result<LoopStats, SimError> {
        if self.state == LoopState::Stopped {
            return Ok(self.stats());
        }

        let (width, height) = self.window;
        renderer.init(width, height)?;

        self.state = LoopState::Ticking;
        self.cycles.observe(self.grid.state_hash());
        tracing::info!(
            dims = %self.grid.dims(),
            population = self.grid.population(),
            interval = ?self.interval,
            "simulation started"
        );

        let reason = loop {
            if let Some(reason) = self.pending_stop(renderer) {
                break reason;
            }

            let started = Instant::now();
            self.tick_once(renderer);
            let work = started.elapsed();
            self.timer.record(work);

            if self.pending_stop(renderer).is_none() {
                self.pace(work);
            }
        };

        self.state = LoopState::Stopped;
        self.stop_reason = Some(reason);
        tracing::info!(
            ticks = self.tick,
            population = self.grid.population(),
            %reason,
            "simulation stopped"
        );
        Ok(self.stats())
    }

    /// Advance and draw exactly one generation, without pacing.
    ///
    /// Returns the new tick number, or `None` once the loop has stopped.
    pub fn step<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Option<u64> {
        if self.state == LoopState::Stopped {
            return None;
        }
        self.tick_once(renderer);
        Some(self.tick)
    }

    fn tick_once<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        let _span = tracing::info_span!("tick", tick = self.tick + 1).entered();

        self.grid.advance();
        self.tick += 1;

        if let Some(period) = self.cycles.observe(self.grid.state_hash()) {
            if self.cycle_period.is_none() {
                tracing::info!(tick = self.tick, period, "grid entered a cycle");
            }
            self.cycle_period = Some(period);
        }

        render_grid(renderer, &self.grid);
        tracing::debug!(population = self.grid.population(), "tick complete");
    }

    fn pending_stop<R: Renderer + ?Sized>(&self, renderer: &R) -> Option<StopReason> {
        if renderer.should_close() {
            return Some(StopReason::CloseRequested);
        }
        if self.max_generations.is_some_and(|max| self.tick >= max) {
            return Some(StopReason::GenerationLimit);
        }
        if self.halt_on_cycle {
            if let Some(period) = self.cycle_period {
                return Some(StopReason::Cycle { period });
            }
        }
        None
    }

    fn pace(&self, work: Duration) {
        if self.interval.is_zero() {
            return;
        }
        match self.interval.checked_sub(work) {
            Some(rest) => std::thread::sleep(rest),
            None => tracing::warn!(
                tick = self.tick,
                ?work,
                interval = ?self.interval,
                "tick overran its interval"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifegrid_common::CellCoord;

    /// Records every frame and closes after `close_after` frames.
    #[derive(Default)]
    struct Scripted {
        close_after: Option<usize>,
        fail_init: bool,
        inits: usize,
        frames: Vec<Vec<CellCoord>>,
        open: bool,
    }

    impl Renderer for Scripted {
        fn init(&mut self, _width: u32, _height: u32) -> Result<(), GraphicsInitError> {
            self.inits += 1;
            if self.fail_init {
                return Err(GraphicsInitError::NoAdapter);
            }
            Ok(())
        }

        fn begin_frame(&mut self) {
            assert!(!self.open, "frame already open");
            self.open = true;
            self.frames.push(Vec::new());
        }

        fn draw_live_cell(&mut self, x: usize, y: usize, _rows: usize, _columns: usize) {
            assert!(self.open, "draw outside a frame");
            if let Some(frame) = self.frames.last_mut() {
                frame.push(CellCoord::new(x, y));
            }
        }

        fn end_frame(&mut self) {
            self.open = false;
        }

        fn should_close(&self) -> bool {
            self.close_after.is_some_and(|n| self.frames.len() >= n)
        }
    }

    fn fast_config() -> SimConfig {
        SimConfig {
            tick_interval_ms: 0,
            ..SimConfig::default()
        }
    }

    #[test]
    fn close_signal_stops_the_loop() {
        let grid = Grid::new(10, 10, 0.4, 3).unwrap();
        let mut sim = SimulationLoop::new(grid, &fast_config());
        assert_eq!(sim.state(), LoopState::Idle);

        let mut renderer = Scripted {
            close_after: Some(3),
            ..Scripted::default()
        };
        let stats = sim.run(&mut renderer).unwrap();

        assert_eq!(renderer.inits, 1);
        assert_eq!(stats.ticks, 3);
        assert_eq!(renderer.frames.len(), 3);
        assert_eq!(stats.stop_reason, Some(StopReason::CloseRequested));
        assert_eq!(sim.state(), LoopState::Stopped);
    }

    #[test]
    fn each_tick_advances_once_then_draws() {
        let grid = Grid::new(12, 9, 0.35, 11).unwrap();
        let mut reference = grid.clone();
        let mut sim = SimulationLoop::new(grid, &fast_config());

        let mut renderer = Scripted {
            close_after: Some(5),
            ..Scripted::default()
        };
        sim.run(&mut renderer).unwrap();

        for frame in &renderer.frames {
            reference.advance();
            assert_eq!(frame, &reference.live_cells().collect::<Vec<_>>());
        }
        assert_eq!(sim.grid(), &reference);
    }

    #[test]
    fn generation_limit_stops_the_loop() {
        let config = SimConfig {
            max_generations: Some(4),
            ..fast_config()
        };
        let mut sim = SimulationLoop::new(Grid::new(8, 8, 0.5, 1).unwrap(), &config);
        let mut renderer = Scripted::default();
        let stats = sim.run(&mut renderer).unwrap();

        assert_eq!(stats.ticks, 4);
        assert_eq!(stats.stop_reason, Some(StopReason::GenerationLimit));
    }

    #[test]
    fn halts_on_still_life_when_asked() {
        let config = SimConfig {
            halt_on_cycle: true,
            max_generations: Some(50),
            ..fast_config()
        };
        let block = Grid::from_live_cells(6, 6, [(2, 2), (2, 3), (3, 2), (3, 3)]).unwrap();
        let mut sim = SimulationLoop::new(block, &config);
        let stats = sim.run(&mut Scripted::default()).unwrap();

        assert_eq!(stats.ticks, 1);
        assert_eq!(stats.stop_reason, Some(StopReason::Cycle { period: 1 }));
        assert_eq!(stats.cycle_period, Some(1));
    }

    #[test]
    fn cycles_are_reported_without_halting_by_default() {
        let config = SimConfig {
            max_generations: Some(6),
            ..fast_config()
        };
        let blinker = Grid::from_live_cells(5, 5, [(2, 1), (2, 2), (2, 3)]).unwrap();
        let mut sim = SimulationLoop::new(blinker, &config);
        let stats = sim.run(&mut Scripted::default()).unwrap();

        assert_eq!(stats.ticks, 6);
        assert_eq!(stats.cycle_period, Some(2));
        assert_eq!(stats.stop_reason, Some(StopReason::GenerationLimit));
    }

    #[test]
    fn init_failure_issues_no_ticks() {
        let mut sim = SimulationLoop::new(Grid::new(4, 4, 0.5, 2).unwrap(), &fast_config());
        let before = sim.grid().clone();
        let mut renderer = Scripted {
            fail_init: true,
            ..Scripted::default()
        };

        let err = sim.run(&mut renderer).unwrap_err();
        assert!(matches!(err, SimError::Graphics(GraphicsInitError::NoAdapter)));
        assert_eq!(sim.tick(), 0);
        assert!(renderer.frames.is_empty());
        assert_eq!(sim.grid(), &before);
        assert_ne!(sim.state(), LoopState::Ticking);
    }

    #[test]
    fn closed_before_first_tick() {
        let mut sim = SimulationLoop::new(Grid::new(4, 4, 0.5, 2).unwrap(), &fast_config());
        let mut renderer = Scripted {
            close_after: Some(0),
            ..Scripted::default()
        };
        let stats = sim.run(&mut renderer).unwrap();
        assert_eq!(renderer.inits, 1);
        assert_eq!(stats.ticks, 0);
    }

    #[test]
    fn stopped_loop_does_not_tick_again() {
        let config = SimConfig {
            max_generations: Some(2),
            ..fast_config()
        };
        let mut sim = SimulationLoop::new(Grid::new(6, 6, 0.5, 8).unwrap(), &config);
        let mut renderer = Scripted::default();
        let first = sim.run(&mut renderer).unwrap();

        let second = sim.run(&mut renderer).unwrap();
        assert_eq!(first, second);
        assert_eq!(renderer.inits, 1);
        assert_eq!(sim.step(&mut renderer), None);
        assert_eq!(renderer.frames.len(), 2);
    }

    #[test]
    fn step_ticks_once() {
        let mut sim = SimulationLoop::new(Grid::new(6, 6, 0.5, 8).unwrap(), &fast_config());
        let mut renderer = Scripted::default();
        assert_eq!(sim.step(&mut renderer), Some(1));
        assert_eq!(sim.step(&mut renderer), Some(2));
        assert_eq!(renderer.frames.len(), 2);
    }

    #[test]
    fn ticks_are_paced() {
        let config = SimConfig {
            tick_interval_ms: 20,
            max_generations: Some(3),
            ..SimConfig::default()
        };
        let mut sim = SimulationLoop::new(Grid::new(5, 5, 0.5, 4).unwrap(), &config);
        let started = Instant::now();
        sim.run(&mut Scripted::default()).unwrap();

        // Two waits: none after the final tick.
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn from_config_prefers_pattern() {
        let config = SimConfig {
            rows: 5,
            columns: 5,
            pattern: Some("blinker".into()),
            ..fast_config()
        };
        let sim = SimulationLoop::from_config(&config).unwrap();
        assert_eq!(sim.grid().population(), 3);
        assert!(sim.grid().is_alive(2, 2));
    }

    #[test]
    fn from_config_is_deterministic_with_seed() {
        let config = SimConfig {
            rng_seed: Some(1234),
            ..fast_config()
        };
        let a = SimulationLoop::from_config(&config).unwrap();
        let b = SimulationLoop::from_config(&config).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.grid().seed(), 1234);
    }

    #[test]
    fn from_config_surfaces_kernel_errors() {
        let config = SimConfig {
            pattern: Some("nope".into()),
            ..fast_config()
        };
        assert!(matches!(
            SimulationLoop::from_config(&config),
            Err(SimError::Kernel(KernelError::UnknownPattern(_)))
        ));

        let config = SimConfig {
            rows: 0,
            ..fast_config()
        };
        assert!(matches!(
            SimulationLoop::from_config(&config),
            Err(SimError::Kernel(KernelError::InvalidDimension { .. }))
        ));
    }
}
