//! Named seed patterns for stamping onto a universe.

use life_core::{Error, Position, Result};
use serde::{Deserialize, Serialize};

/// A set of live cells relative to a top-left anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    name: String,
    width: u32,
    height: u32,
    cells: Vec<Position>,
}

impl Pattern {
    /// Parse rows of `#` (alive) and `.` (dead). All rows must be the same
    /// width and at least one cell must be alive.
    pub fn from_rows(name: impl Into<String>, rows: &[&str]) -> Result<Self> {
        let name = name.into();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(Error::InvalidPattern(format!("{} has no cells", name)));
        }

        let mut cells = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != width {
                return Err(Error::InvalidPattern(format!(
                    "{} row {} is not {} cells wide",
                    name, row, width
                )));
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '#' => cells.push(Position::new(col as u32, row as u32)),
                    '.' => {}
                    other => {
                        return Err(Error::InvalidPattern(format!(
                            "{} has unexpected character {:?} at ({}, {})",
                            name, other, col, row
                        )))
                    }
                }
            }
        }

        if cells.is_empty() {
            return Err(Error::InvalidPattern(format!("{} has no live cells", name)));
        }

        Ok(Self {
            name,
            width: width as u32,
            height: rows.len() as u32,
            cells,
        })
    }

    /// Period-2 oscillator, horizontal phase
    pub fn blinker() -> Self {
        Self::builtin("blinker", &["###"])
    }

    /// 2x2 still life
    pub fn block() -> Self {
        Self::builtin("block", &["##", "##"])
    }

    /// Period-4 spaceship travelling toward +col, +row
    pub fn glider() -> Self {
        Self::builtin("glider", &[".#.", "..#", "###"])
    }

    /// Look up a built-in pattern by name
    pub fn named(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "blinker" => Some(Self::blinker()),
            "block" => Some(Self::block()),
            "glider" => Some(Self::glider()),
            _ => None,
        }
    }

    fn builtin(name: &str, rows: &[&str]) -> Self {
        match Self::from_rows(name, rows) {
            Ok(pattern) => pattern,
            Err(e) => unreachable!("built-in pattern {} is malformed: {}", name, e),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Live cell offsets, in row-major order
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }
}
