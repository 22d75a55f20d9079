//! Two-in-a-row detection over a single line.

use crate::{Player, Square};

/// Checks whether a line holds exactly two of `player`'s marks and one empty square.
///
/// The third square, by elimination, is the opponent's mark or an
/// unrecognized token.
pub fn has_two_in_line(line: &[Square; 3], player: Player) -> bool {
    let matching = line
        .iter()
        .filter(|square| **square == Square::Occupied(player))
        .count();
    let empty = line.iter().filter(|square| square.is_empty()).count();
    matching == 2 && empty == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Square = Square::Occupied(Player::X);
    const O: Square = Square::Occupied(Player::O);
    const E: Square = Square::Empty;

    #[test]
    fn test_two_with_gap_in_any_slot() {
        for line in [[O, O, E], [O, E, O], [E, O, O]] {
            assert!(has_two_in_line(&line, Player::O));
            assert!(!has_two_in_line(&line, Player::X));
        }
    }

    #[test]
    fn test_full_or_blocked_lines() {
        assert!(!has_two_in_line(&[O, O, O], Player::O));
        assert!(!has_two_in_line(&[O, O, X], Player::O));
        assert!(!has_two_in_line(&[X, X, O], Player::X));
    }

    #[test]
    fn test_single_mark_is_not_a_threat() {
        assert!(!has_two_in_line(&[O, E, E], Player::O));
        assert!(!has_two_in_line(&[E, E, E], Player::O));
    }

    #[test]
    fn test_unrecognized_neither_matches_nor_empty() {
        let line = [O, Square::Unrecognized, O];
        assert!(!has_two_in_line(&line, Player::O));
        let line = [X, X, Square::Unrecognized];
        assert!(!has_two_in_line(&line, Player::X));
    }
}
