use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lifegrid_common::{ConfigOverrides, SimConfig};
use lifegrid_kernel::patterns::PATTERNS;
use lifegrid_render::TextRenderer;
use lifegrid_sim::SimulationLoop;
use lifegrid_tools::GridInspector;
use tracing_subscriber::EnvFilter;

/// Generations printed by `run` when nothing else bounds it.
const DEFAULT_GENERATIONS: u64 = 20;

#[derive(Parser)]
#[command(name = "lifegrid-cli", about = "Run and inspect toroidal Game of Life grids")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML or JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: ConfigOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation, printing every generation as text
    Run {
        /// Keep running until interrupted instead of stopping after 20 generations
        #[arg(long)]
        forever: bool,
    },
    /// Print a summary of the starting grid
    Info {
        /// Also show one cell's state and neighbor count, as ROW,COL
        #[arg(long, value_parser = parse_coord)]
        cell: Option<(usize, usize)>,
    },
    /// List the built-in starting patterns
    Patterns,
}

fn parse_coord(s: &str) -> Result<(usize, usize), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;
    let parse = |v: &str| v.trim().parse::<usize>().map_err(|e| format!("{v:?}: {e}"));
    Ok((parse(x)?, parse(y)?))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let mut config = SimConfig::resolve(cli.config.as_deref(), &cli.overrides)
        .context("invalid configuration")?;

    match cli.command {
        Commands::Run { forever } => {
            if !forever && config.max_generations.is_none() {
                config.max_generations = Some(DEFAULT_GENERATIONS);
            }
            let seed = config.ensure_seed();
            let mut sim = SimulationLoop::from_config(&config)?;
            let mut renderer = TextRenderer::new(std::io::stdout().lock(), config.dims());

            let stats = sim.run(&mut renderer).context("simulation failed")?;
            drop(renderer);

            println!("{}", GridInspector::summary(sim.grid()));
            println!(
                "ticks={} seed={seed} stop={} cycle={} tick_avg={:?} tick_max={:?}",
                stats.ticks,
                stats
                    .stop_reason
                    .map_or_else(|| "none".to_string(), |r| r.to_string()),
                stats
                    .cycle_period
                    .map_or_else(|| "none".to_string(), |p| p.to_string()),
                stats.tick_average,
                stats.tick_max,
            );
        }
        Commands::Info { cell } => {
            config.ensure_seed();
            let sim = SimulationLoop::from_config(&config)?;
            let grid = sim.grid();

            println!("lifegrid-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("{}", GridInspector::summary(grid));
            if let Some((lo, hi)) = GridInspector::bounding_box(grid) {
                println!("live bounds: ({}, {})..=({}, {})", lo.x, lo.y, hi.x, hi.y);
            }
            if let Some((x, y)) = cell {
                let info = GridInspector::inspect_cell(grid, x, y)
                    .with_context(|| format!("cell ({x}, {y}) is outside {}", grid.dims()))?;
                println!("{info}");
            }
            print!("{grid}");
        }
        Commands::Patterns => {
            for pattern in PATTERNS {
                println!(
                    "{:<8} {}x{} ({} cells)",
                    pattern.name,
                    pattern.height(),
                    pattern.width(),
                    pattern.cells.len()
                );
            }
        }
    }

    Ok(())
}
