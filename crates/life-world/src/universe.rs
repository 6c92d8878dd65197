//! Toroidal Game of Life grid.

use crate::pattern::Pattern;
use life_core::{Cell, Error, Position, Result, UniverseConfig};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt;
use tracing::{debug, trace};

/// Row-major index of `(col, row)` in a grid `width` cells wide.
#[inline]
pub fn cell_index(width: u32, col: u32, row: u32) -> usize {
    row as usize * width as usize + col as usize
}

/// Fill a `width * height` buffer from `fill`, reporting a grid that cannot
/// be allocated as bad dimensions.
fn alloc_cells(config: &UniverseConfig, fill: impl Iterator<Item = Cell>) -> Result<Vec<Cell>> {
    let too_large = || Error::InvalidDimensions {
        width: config.width,
        height: config.height,
    };
    let len = config.cell_count().ok_or_else(too_large)?;

    let mut cells = Vec::new();
    cells.try_reserve_exact(len).map_err(|_| too_large())?;
    cells.extend(fill.take(len));
    Ok(cells)
}

/// B3/S23: survive on two or three live neighbors, birth on exactly three.
#[inline]
pub fn next_state(cell: Cell, live_neighbors: u8) -> Cell {
    match (cell, live_neighbors) {
        (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive,
        (Cell::Dead, 3) => Cell::Alive,
        _ => Cell::Dead,
    }
}

/// A fixed-size toroidal cellular automaton.
///
/// Cells live in one flat row-major buffer. `tick` writes the next generation
/// into a second buffer of the same length and swaps the two, so every cell is
/// computed from the previous generation only.
#[derive(Debug, Clone)]
pub struct Universe {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    next: Vec<Cell>,
    cell_size: f64,
    generation: u64,
}

impl Universe {
    /// Seed a `width` x `height` board where each cell is alive with
    /// probability `alive_odds`, using fresh entropy.
    pub fn new(width: u32, height: u32, alive_odds: f64) -> Result<Self> {
        Self::from_config(&UniverseConfig::new(width, height, alive_odds))
    }

    /// Build from configuration, honoring a fixed seed when one is set
    pub fn from_config(config: &UniverseConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::seeded(config, &mut rng)
    }

    /// Seed from a caller-supplied random source
    pub fn with_rng<R: Rng + ?Sized>(
        width: u32,
        height: u32,
        alive_odds: f64,
        cell_size: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let config = UniverseConfig {
            width,
            height,
            alive_odds,
            cell_size,
            seed: None,
        };
        config.validate()?;
        Self::seeded(&config, rng)
    }

    /// An all-dead board with the default cell size, used to lay out
    /// fixtures by hand
    pub fn dead(width: u32, height: u32) -> Result<Self> {
        let config = UniverseConfig::new(width, height, 0.0);
        config.validate()?;
        let cells = alloc_cells(&config, std::iter::repeat(Cell::Dead))?;
        Self::from_cells(&config, cells)
    }

    fn seeded<R: Rng + ?Sized>(config: &UniverseConfig, rng: &mut R) -> Result<Self> {
        let cells = alloc_cells(
            config,
            std::iter::repeat_with(|| Cell::from(rng.gen::<f64>() < config.alive_odds)),
        )?;

        let universe = Self::from_cells(config, cells)?;

        debug!(
            width = universe.width,
            height = universe.height,
            alive_odds = config.alive_odds,
            live_cells = universe.live_count(),
            "Seeded universe"
        );

        Ok(universe)
    }

    fn from_cells(config: &UniverseConfig, cells: Vec<Cell>) -> Result<Self> {
        let next = alloc_cells(config, std::iter::repeat(Cell::Dead))?;
        Ok(Self {
            width: config.width,
            height: config.height,
            next,
            cells,
            cell_size: config.cell_size,
            generation: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of ticks since construction
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get_cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Pixel extent of the whole board
    pub fn canvas_size(&self) -> (f64, f64) {
        (
            f64::from(self.width) * self.cell_size,
            f64::from(self.height) * self.cell_size,
        )
    }

    /// Current generation as one contiguous row-major buffer
    pub fn render(&self) -> &[Cell] {
        &self.cells
    }

    /// Render buffer copied out as raw bytes (`0` dead, `1` alive)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.cells.iter().map(|&cell| cell as u8).collect()
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// State of one cell; coordinates are not wrapped
    pub fn cell(&self, col: u32, row: u32) -> Result<Cell> {
        self.check_bounds(col, row)?;
        Ok(self.cells[cell_index(self.width, col, row)])
    }

    /// Flip one cell without advancing the generation.
    pub fn click(&mut self, col: u32, row: u32) -> Result<()> {
        self.check_bounds(col, row)?;
        let idx = cell_index(self.width, col, row);
        self.cells[idx].toggle();
        trace!(col, row, state = ?self.cells[idx], "Toggled cell");
        Ok(())
    }

    /// Map a pointer position to the cell under it
    pub fn cell_at_pixel(&self, x: f64, y: f64) -> Result<Position> {
        let col = (x / self.cell_size).floor();
        let row = (y / self.cell_size).floor();

        // NaN fails both comparisons
        let in_range = |v: f64, limit: u32| v >= 0.0 && v < f64::from(limit);
        if !(in_range(col, self.width) && in_range(row, self.height)) {
            return Err(Error::PixelOutOfBounds { x, y });
        }

        Ok(Position::new(col as u32, row as u32))
    }

    /// Mark every listed cell alive. Nothing changes if any position is
    /// out of bounds.
    pub fn set_alive(&mut self, positions: &[Position]) -> Result<()> {
        for pos in positions {
            self.check_bounds(pos.col, pos.row)?;
        }
        for pos in positions {
            let idx = cell_index(self.width, pos.col, pos.row);
            self.cells[idx] = Cell::Alive;
        }
        Ok(())
    }

    /// Stamp a pattern with its top-left corner at `(col, row)`.
    ///
    /// The anchor must be on the board; pattern cells past an edge wrap
    /// around like neighbors do.
    pub fn place(&mut self, pattern: &Pattern, col: u32, row: u32) -> Result<()> {
        self.check_bounds(col, row)?;
        if pattern.width() > self.width || pattern.height() > self.height {
            return Err(Error::InvalidPattern(format!(
                "{} is {}x{}, larger than the {}x{} grid",
                pattern.name(),
                pattern.width(),
                pattern.height(),
                self.width,
                self.height
            )));
        }

        let anchor = Position::new(col, row);
        for offset in pattern.cells() {
            let pos = anchor.offset_wrapped(
                i64::from(offset.col),
                i64::from(offset.row),
                self.width,
                self.height,
            );
            let idx = cell_index(self.width, pos.col, pos.row);
            self.cells[idx] = Cell::Alive;
        }
        Ok(())
    }

    /// Advance one generation.
    pub fn tick(&mut self) {
        for row in 0..self.height {
            for col in 0..self.width {
                let idx = cell_index(self.width, col, row);
                let live_neighbors = self.live_neighbor_count(col, row);
                self.next[idx] = next_state(self.cells[idx], live_neighbors);
            }
        }

        std::mem::swap(&mut self.cells, &mut self.next);
        self.generation += 1;

        trace!(generation = self.generation, "Advanced universe");
    }

    /// Live cells among the eight toroidal neighbor slots of `(col, row)`.
    ///
    /// On boards one or two cells wide a slot can land on the same cell as
    /// another slot (or the center), and it is counted each time.
    fn live_neighbor_count(&self, col: u32, row: u32) -> u8 {
        let north = if row == 0 { self.height - 1 } else { row - 1 };
        let south = if row + 1 == self.height { 0 } else { row + 1 };
        let west = if col == 0 { self.width - 1 } else { col - 1 };
        let east = if col + 1 == self.width { 0 } else { col + 1 };

        [
            (west, north),
            (col, north),
            (east, north),
            (west, row),
            (east, row),
            (west, south),
            (col, south),
            (east, south),
        ]
        .iter()
        .map(|&(c, r)| self.cells[cell_index(self.width, c, r)] as u8)
        .sum()
    }

    fn check_bounds(&self, col: u32, row: u32) -> Result<()> {
        if !Position::new(col, row).in_bounds(self.width, self.height) {
            return Err(Error::OutOfBounds {
                col,
                row,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.cells.chunks(self.width as usize) {
            for &cell in line {
                let symbol = if cell.is_alive() { '◼' } else { '◻' };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
