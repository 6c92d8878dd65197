//! Core type definitions for the automaton.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single cell.
///
/// The discriminants are part of the render contract: a `&[Cell]` buffer is
/// read by callers as one byte per cell, `0` dead and `1` alive.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// The opposite state
    pub fn toggled(self) -> Self {
        match self {
            Cell::Alive => Cell::Dead,
            Cell::Dead => Cell::Alive,
        }
    }

    pub fn toggle(&mut self) {
        *self = self.toggled();
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

/// Grid coordinate, column first to match `click(col, row)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub col: u32,
    pub row: u32,
}

impl Position {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Offset by a signed delta, wrapping toroidally for the given dimensions
    pub fn offset_wrapped(&self, dcol: i64, drow: i64, width: u32, height: u32) -> Self {
        let w = i64::from(width);
        let h = i64::from(height);
        Self {
            col: (i64::from(self.col) + dcol).rem_euclid(w) as u32,
            row: (i64::from(self.row) + drow).rem_euclid(h) as u32,
        }
    }

    pub fn in_bounds(&self, width: u32, height: u32) -> bool {
        self.col < width && self.row < height
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}
