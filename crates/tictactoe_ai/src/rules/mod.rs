//! Board-line rules used by the move heuristic.
//!
//! Pure functions over [`Board`](crate::Board) that read lines of three
//! squares and never mutate the board.

pub mod lines;
pub mod threats;

pub use lines::has_two_in_line;
pub use threats::find_completion;
