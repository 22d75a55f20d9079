//! Uniform random choice among empty squares.

use crate::{Board, Move};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument, warn};

/// Move returned when the board has no empty square.
pub const FULL_BOARD_FALLBACK: Move = Move::new(0, 0);

/// Lists every empty square in row-major order.
pub fn empty_cells(board: &Board) -> Vec<Move> {
    (0..3)
        .flat_map(|row| (0..3).map(move |col| (row, col)))
        .filter(|&(row, col)| board.is_empty(row, col))
        .map(|(row, col)| Move::at(row, col))
        .collect()
}

/// Picks an empty square uniformly at random.
///
/// A full board yields [`FULL_BOARD_FALLBACK`] rather than an error; callers
/// detect finished games themselves.
#[instrument(skip(board, rng))]
pub fn random_empty<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Move {
    let cells = empty_cells(board);
    match cells.choose(rng) {
        Some(choice) => {
            debug!(choice = %choice, candidates = cells.len(), "Random move chosen");
            *choice
        }
        None => {
            warn!("No empty squares, using fallback move");
            FULL_BOARD_FALLBACK
        }
    }
}
