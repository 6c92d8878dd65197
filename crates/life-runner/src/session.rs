//! Run/pause/reset state around one universe.

use life_core::{Position, Result, RunnerConfig, UniverseConfig};
use life_world::{Pattern, Universe};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Caller-side controls for a universe. The universe itself never paces or
/// schedules anything; the session only decides whether a step ticks.
pub struct Session {
    config: RunnerConfig,
    universe: Universe,
    running: bool,
}

impl Session {
    pub fn new(config: RunnerConfig) -> Result<Self> {
        config.validate()?;
        let universe = Universe::from_config(&config.universe)?;
        Ok(Self {
            config,
            universe,
            running: false,
        })
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Flip between running and paused, returning the new state
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        debug!(running = self.running, "Toggled run state");
        self.running
    }

    /// Replace the universe with a freshly seeded one and pause.
    pub fn reset(&mut self) -> Result<()> {
        self.universe = Universe::from_config(&self.config.universe)?;
        self.running = false;
        info!(generation = 0, live_cells = self.universe.live_count(), "Universe reset");
        Ok(())
    }

    /// Rebuild the universe with new parameters. The run state is kept; the
    /// current universe survives if the new parameters are rejected.
    pub fn reconfigure(&mut self, universe: UniverseConfig) -> Result<()> {
        let rebuilt = Universe::from_config(&universe)?;
        info!(
            width = universe.width,
            height = universe.height,
            alive_odds = universe.alive_odds,
            "Universe reconfigured"
        );
        self.config.universe = universe;
        self.universe = rebuilt;
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config.tick_interval_ms)
    }

    pub fn set_tick_interval(&mut self, millis: u64) -> Result<()> {
        let mut config = self.config.clone();
        config.tick_interval_ms = millis;
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Toggle one cell; works while paused and does not advance the generation
    pub fn click(&mut self, col: u32, row: u32) -> Result<()> {
        self.universe.click(col, row)
    }

    /// Stamp a pattern onto the current universe
    pub fn place(&mut self, pattern: &Pattern, col: u32, row: u32) -> Result<()> {
        self.universe.place(pattern, col, row)?;
        debug!(pattern = pattern.name(), col, row, "Placed pattern");
        Ok(())
    }

    /// Toggle the cell under a pointer position
    pub fn click_pixel(&mut self, x: f64, y: f64) -> Result<Position> {
        let pos = self.universe.cell_at_pixel(x, y)?;
        self.universe.click(pos.col, pos.row)?;
        Ok(pos)
    }

    /// Advance one generation if running. Returns whether a tick happened.
    #[instrument(skip(self), fields(generation = self.universe.generation()))]
    pub fn step(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.universe.tick();
        true
    }

    /// True once `max_ticks` generations have been run
    pub fn finished(&self) -> bool {
        self.config
            .max_ticks
            .is_some_and(|max| self.universe.generation() >= max)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            generation: self.universe.generation(),
            live_cells: self.universe.live_count(),
            width: self.universe.width(),
            height: self.universe.height(),
        }
    }
}

/// Final state reported when a run ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub generation: u64,
    pub live_cells: usize,
    pub width: u32,
    pub height: u32,
}
