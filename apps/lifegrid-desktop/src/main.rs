use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use lifegrid_common::{ConfigOverrides, SimConfig};
use lifegrid_render::{GraphicsInitError, Renderer, cell_quad};
use lifegrid_render_wgpu::CellRenderer;
use lifegrid_sim::SimulationLoop;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

/// How long `init` blocks per pump while waiting for the window to appear.
const INIT_PUMP_TIMEOUT: Duration = Duration::from_millis(16);

#[derive(Parser)]
#[command(name = "lifegrid-desktop", about = "Lifegrid desktop viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML or JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: ConfigOverrides,
}

/// GPU resources bound to the window surface.
struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    cells: CellRenderer,
}

impl Gpu {
    fn new(window: Arc<Window>) -> Result<Self, GraphicsInitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| GraphicsInitError::Surface(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(GraphicsInitError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("lifegrid_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| GraphicsInitError::Device(e.to_string()))?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(caps.formats.first())
            .copied()
            .ok_or_else(|| GraphicsInitError::Surface("surface reports no formats".into()))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes.first().copied().unwrap_or_default(),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let cells = CellRenderer::new(&device, format);
        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            ?format,
            "GPU initialized"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            cells,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    fn present(&mut self) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.cells.render(&self.device, &self.queue, &view);
        output.present();
    }
}

/// Window lifecycle driven by winit callbacks.
struct WindowShell {
    title: String,
    size: PhysicalSize<u32>,
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    init_error: Option<GraphicsInitError>,
    close_requested: bool,
}

impl ApplicationHandler for WindowShell {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.title.as_str())
            .with_inner_size(self.size);
        let created = event_loop
            .create_window(attrs)
            .map_err(|e| GraphicsInitError::Window(e.to_string()))
            .map(Arc::new)
            .and_then(|window| Gpu::new(window.clone()).map(|gpu| (window, gpu)));

        match created {
            Ok((window, gpu)) => {
                self.window = Some(window);
                self.gpu = Some(gpu);
            }
            Err(e) => {
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                tracing::info!("close requested");
                self.close_requested = true;
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                }
            }
            _ => {}
        }
    }
}

/// [`Renderer`] backed by a winit window and the wgpu cell pipeline.
///
/// The simulation loop owns the pacing, so the event loop is pumped once per
/// frame instead of being handed control.
struct DesktopRenderer {
    event_loop: Option<EventLoop<()>>,
    shell: WindowShell,
}

impl DesktopRenderer {
    fn new(title: impl Into<String>) -> Self {
        Self {
            event_loop: None,
            shell: WindowShell {
                title: title.into(),
                size: PhysicalSize::new(0, 0),
                window: None,
                gpu: None,
                init_error: None,
                close_requested: false,
            },
        }
    }

    fn pump(&mut self, timeout: Duration) {
        let Some(event_loop) = &mut self.event_loop else {
            return;
        };
        if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(timeout), &mut self.shell)
        {
            tracing::debug!(code, "event loop exited");
            self.shell.close_requested = true;
        }
    }
}

impl Renderer for DesktopRenderer {
    fn init(&mut self, width: u32, height: u32) -> Result<(), GraphicsInitError> {
        if self.event_loop.is_some() {
            return Err(GraphicsInitError::AlreadyInitialized);
        }
        self.shell.size = PhysicalSize::new(width, height);
        self.event_loop =
            Some(EventLoop::new().map_err(|e| GraphicsInitError::EventLoop(e.to_string()))?);

        loop {
            self.pump(INIT_PUMP_TIMEOUT);
            if let Some(e) = self.shell.init_error.take() {
                return Err(e);
            }
            if self.shell.gpu.is_some() {
                return Ok(());
            }
            if self.shell.close_requested {
                return Err(GraphicsInitError::ClosedDuringInit);
            }
        }
    }

    fn begin_frame(&mut self) {
        if let Some(gpu) = &mut self.shell.gpu {
            gpu.cells.clear();
        }
    }

    fn draw_live_cell(&mut self, x: usize, y: usize, rows: usize, columns: usize) {
        if let Some(gpu) = &mut self.shell.gpu {
            gpu.cells.push(cell_quad(x, y, rows, columns));
        }
    }

    fn end_frame(&mut self) {
        if let Some(gpu) = &mut self.shell.gpu {
            gpu.present();
        }
        self.pump(Duration::ZERO);
    }

    fn should_close(&self) -> bool {
        self.shell.close_requested
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("lifegrid-desktop starting");

    let mut config = SimConfig::resolve(cli.config.as_deref(), &cli.overrides)
        .context("invalid configuration")?;
    let seed = config.ensure_seed();

    let mut sim = SimulationLoop::from_config(&config)?;
    let mut renderer = DesktopRenderer::new(format!("lifegrid {} (seed {seed})", config.dims()));
    let stats = sim.run(&mut renderer).context("simulation failed")?;

    tracing::info!(
        ticks = stats.ticks,
        population = stats.population,
        tick_avg = ?stats.tick_average,
        "lifegrid-desktop exiting"
    );
    Ok(())
}
