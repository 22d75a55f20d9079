//! Difficulty-tiered line heuristic.
//!
//! Policy, first applicable branch wins:
//!
//! 1. Complete our own two-in-a-row.
//! 2. Block the opponent's two-in-a-row (every tier but easy).
//! 3. Take the center, else a random free corner (medium and hard only).
//! 4. Play a random empty square.

use super::random::random_empty;
use crate::rules::find_completion;
use crate::{Board, Difficulty, Move, Player};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Center square.
pub const CENTER: (usize, usize) = (1, 1);

/// The four corners, before shuffling.
pub const CORNERS: [(usize, usize); 4] = [(0, 0), (0, 2), (2, 0), (2, 2)];

/// Chooses a move for [`Player::AI`] without outside help.
///
/// Total over well-formed boards. Consumes randomness only for the corner
/// shuffle and the final random pick.
#[instrument(skip(board, rng))]
pub fn decide<R: Rng + ?Sized>(board: &Board, difficulty: Difficulty, rng: &mut R) -> Move {
    if let Some(win) = find_completion(board, Player::AI) {
        debug!(choice = %win, "Taking the win");
        return win;
    }

    if difficulty.blocks()
        && let Some(block) = find_completion(board, Player::AI.opponent())
    {
        debug!(choice = %block, "Blocking the opponent");
        return block;
    }

    if difficulty.uses_position() {
        let (row, col) = CENTER;
        if board.is_empty(row, col) {
            debug!("Taking the center");
            return Move::at(row, col);
        }

        let mut corners = CORNERS;
        corners.shuffle(rng);
        if let Some(&(row, col)) = corners.iter().find(|&&(row, col)| board.is_empty(row, col)) {
            debug!(row, col, "Taking a corner");
            return Move::at(row, col);
        }
    }

    debug!("Falling back to a random square");
    random_empty(board, rng)
}
