//! Configuration types for the engine and its runner.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Pixel span of one cell when no override is configured
pub const DEFAULT_CELL_SIZE: f64 = 10.0;

/// Universe construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseConfig {
    /// Number of columns
    pub width: u32,
    /// Number of rows
    pub height: u32,
    /// Probability that a cell starts alive (0.0 to 1.0)
    pub alive_odds: f64,
    /// Rendering span of one cell, in pixels
    pub cell_size: f64,
    /// Fixed seed for reproducible boards; fresh entropy when unset
    pub seed: Option<u64>,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 50,
            alive_odds: 0.2,
            cell_size: DEFAULT_CELL_SIZE,
            seed: None,
        }
    }
}

impl UniverseConfig {
    pub fn new(width: u32, height: u32, alive_odds: f64) -> Self {
        Self {
            width,
            height,
            alive_odds,
            ..Default::default()
        }
    }

    /// Number of cells, if a one-byte-per-cell buffer of that length can
    /// exist at all
    pub fn cell_count(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .filter(|&cells| cells <= isize::MAX as usize)
    }

    /// Check every construction contract without allocating a grid.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        if self.cell_count().is_none() {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        // Written as a positive range check so NaN fails too.
        if !(0.0..=1.0).contains(&self.alive_odds) {
            return Err(Error::InvalidProbability(self.alive_odds));
        }

        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(Error::InvalidCellSize(self.cell_size));
        }

        Ok(())
    }
}

/// Runner pacing and reporting parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Universe to build on start and on every reset
    pub universe: UniverseConfig,
    /// Delay between generations (milliseconds)
    pub tick_interval_ms: u64,
    /// Stop after this many generations; run until interrupted when unset
    pub max_ticks: Option<u64>,
    /// Print a text frame every N generations (0 disables frames)
    pub frame_every: u64,
    /// Emit a progress event every N generations (0 disables progress events)
    pub log_every: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            universe: UniverseConfig::default(),
            tick_interval_ms: 100,
            max_ticks: None,
            frame_every: 0,
            log_every: 100,
        }
    }
}

impl RunnerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RunnerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading runner configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(Error::Config(
                "tick_interval_ms must be at least 1".to_string(),
            ));
        }
        self.universe.validate()
    }
}
