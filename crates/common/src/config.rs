//! Simulation configuration: defaults, file loading, CLI overrides.
//!
//! Precedence is CLI flag over config file over built-in default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::GridDims;

/// Errors from loading or validating a [`SimConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("YAML error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unsupported config extension for {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),
    #[error("grid dimensions must be positive, got {rows}x{columns}")]
    InvalidDimension { rows: usize, columns: usize },
    #[error("live_threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),
    #[error("window size must be positive, got {width}x{height}")]
    InvalidWindow { width: u32, height: u32 },
}

/// All tunables of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Grid height.
    pub rows: usize,
    /// Grid width.
    pub columns: usize,
    /// Probability that a cell starts alive, in `[0, 1]`.
    pub live_threshold: f64,
    /// Milliseconds between generations.
    pub tick_interval_ms: u64,
    /// Deterministic seed. `None` derives one from the clock.
    pub rng_seed: Option<u64>,
    /// Stop after this many generations. `None` runs until the renderer closes.
    pub max_generations: Option<u64>,
    /// Stop as soon as the grid revisits a recent state.
    pub halt_on_cycle: bool,
    pub window_width: u32,
    pub window_height: u32,
    /// Named starting pattern; replaces random seeding when set.
    pub pattern: Option<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        let dims = GridDims::default();
        Self {
            rows: dims.rows,
            columns: dims.columns,
            live_threshold: 0.3,
            tick_interval_ms: 200,
            rng_seed: None,
            max_generations: None,
            halt_on_cycle: false,
            window_width: 500,
            window_height: 500,
            pattern: None,
        }
    }
}

impl SimConfig {
    /// Load a config file. The format is chosen by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let config = match ext.as_deref() {
            Some("yaml" | "yml") => {
                serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            Some("json") => serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Build the effective config: optional file, then CLI overrides, then validation.
    pub fn resolve(
        path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        overrides.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dims().is_empty() {
            return Err(ConfigError::InvalidDimension {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if !(0.0..=1.0).contains(&self.live_threshold) {
            return Err(ConfigError::InvalidThreshold(self.live_threshold));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::InvalidWindow {
                width: self.window_width,
                height: self.window_height,
            });
        }
        Ok(())
    }

    pub fn dims(&self) -> GridDims {
        GridDims::new(self.rows, self.columns)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// The configured seed, or a fresh clock-derived one.
    pub fn resolved_seed(&self) -> u64 {
        self.rng_seed.unwrap_or_else(clock_seed)
    }

    /// Return the seed, fixing a clock-derived one first if none is set.
    ///
    /// Once called, the config replays deterministically.
    pub fn ensure_seed(&mut self) -> u64 {
        *self.rng_seed.get_or_insert_with(clock_seed)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Command-line overrides shared by the lifegrid binaries.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigOverrides {
    /// Grid height
    #[arg(long)]
    pub rows: Option<usize>,
    /// Grid width
    #[arg(long)]
    pub columns: Option<usize>,
    /// Initial live probability in [0, 1]
    #[arg(long)]
    pub live_threshold: Option<f64>,
    /// Milliseconds between generations
    #[arg(long)]
    pub tick_ms: Option<u64>,
    /// RNG seed for a deterministic run
    #[arg(long)]
    pub seed: Option<u64>,
    /// Stop after this many generations
    #[arg(long)]
    pub generations: Option<u64>,
    /// Stop once the grid repeats a recent state
    #[arg(long)]
    pub halt_on_cycle: bool,
    /// Start from a named pattern instead of random cells
    #[arg(long)]
    pub pattern: Option<String>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut SimConfig) {
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(t) = self.live_threshold {
            config.live_threshold = t;
        }
        if let Some(ms) = self.tick_ms {
            config.tick_interval_ms = ms;
        }
        if self.seed.is_some() {
            config.rng_seed = self.seed;
        }
        if self.generations.is_some() {
            config.max_generations = self.generations;
        }
        if self.halt_on_cycle {
            config.halt_on_cycle = true;
        }
        if self.pattern.is_some() {
            config.pattern.clone_from(&self.pattern);
        }
    }
}
