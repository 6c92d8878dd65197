//! Game of Life engine.
//!
//! This module implements the toroidal grid, its B3/S23 generation step,
//! single-cell toggling, and the seed patterns used to lay out boards by hand.

pub mod pattern;
pub mod universe;

pub use pattern::Pattern;
pub use universe::{cell_index, next_state, Universe};
