//! Local move decision: random play and the line heuristic.

pub mod heuristic;
pub mod random;

pub use heuristic::{CENTER, CORNERS, decide};
pub use random::{FULL_BOARD_FALLBACK, empty_cells, random_empty};
