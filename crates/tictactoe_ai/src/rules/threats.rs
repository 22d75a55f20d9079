//! Scans every line of the board for a square that completes three in a row.

use crate::{Board, Move, Player};
use super::lines::has_two_in_line;
use tracing::{debug, instrument};

/// Finds a move that completes a two-in-a-row for `player`.
///
/// Lines are checked in a fixed order: row 0, column 0, row 1, column 1,
/// row 2, column 2, the main diagonal, then the anti-diagonal. The first
/// empty square of the first threatening line wins. A threatening line with
/// no empty square is skipped.
#[instrument(skip(board))]
pub fn find_completion(board: &Board, player: Player) -> Option<Move> {
    for i in 0..3 {
        if has_two_in_line(&board.row(i), player)
            && let Some(j) = (0..3).find(|&j| board.is_empty(i, j))
        {
            debug!(row = i, col = j, "Row completion found");
            return Some(Move::at(i, j));
        }

        if has_two_in_line(&board.column(i), player)
            && let Some(j) = (0..3).find(|&j| board.is_empty(j, i))
        {
            debug!(row = j, col = i, "Column completion found");
            return Some(Move::at(j, i));
        }
    }

    let diagonal = [board.get(0, 0), board.get(1, 1), board.get(2, 2)];
    if has_two_in_line(&diagonal, player)
        && let Some(i) = (0..3).find(|&i| board.is_empty(i, i))
    {
        debug!(row = i, col = i, "Diagonal completion found");
        return Some(Move::at(i, i));
    }

    let anti_diagonal = [board.get(0, 2), board.get(1, 1), board.get(2, 0)];
    if has_two_in_line(&anti_diagonal, player)
        && let Some(i) = (0..3).find(|&i| board.is_empty(i, 2 - i))
    {
        debug!(row = i, col = 2 - i, "Anti-diagonal completion found");
        return Some(Move::at(i, 2 - i));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;

    const X: Square = Square::Occupied(Player::X);
    const O: Square = Square::Occupied(Player::O);
    const E: Square = Square::Empty;

    #[test]
    fn test_empty_board_has_no_completion() {
        assert_eq!(find_completion(&Board::new(), Player::O), None);
    }

    #[test]
    fn test_row_completion() {
        let board = Board::from_rows([[O, O, E], [E, E, E], [E, E, E]]);
        assert_eq!(find_completion(&board, Player::O), Some(Move::at(0, 2)));
    }

    #[test]
    fn test_column_completion() {
        let board = Board::from_rows([[E, X, E], [E, E, E], [E, X, E]]);
        assert_eq!(find_completion(&board, Player::X), Some(Move::at(1, 1)));
    }

    #[test]
    fn test_diagonals() {
        let board = Board::from_rows([[O, E, E], [E, E, E], [E, E, O]]);
        assert_eq!(find_completion(&board, Player::O), Some(Move::at(1, 1)));

        let board = Board::from_rows([[E, E, E], [E, X, E], [X, E, E]]);
        assert_eq!(find_completion(&board, Player::X), Some(Move::at(0, 2)));
    }

    #[test]
    fn test_column_zero_beats_row_one() {
        // Column 0 and row 1 both threaten; column 0 is scanned first.
        let board = Board::from_rows([[O, X, X], [E, O, O], [O, X, E]]);
        assert_eq!(find_completion(&board, Player::O), Some(Move::at(1, 0)));
    }

    #[test]
    fn test_row_beats_diagonal() {
        let board = Board::from_rows([[O, X, E], [O, O, E], [X, E, E]]);
        assert_eq!(find_completion(&board, Player::O), Some(Move::at(1, 2)));
    }

    #[test]
    fn test_opponent_line_ignored() {
        let board = Board::from_rows([[X, X, E], [E, E, E], [E, E, E]]);
        assert_eq!(find_completion(&board, Player::O), None);
    }
}
