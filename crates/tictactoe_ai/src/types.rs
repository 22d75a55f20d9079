//! Core domain types for the move-decision engine.

use serde::{Deserialize, Serialize};
use strum::EnumString;
use tracing::instrument;

/// Mark placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The human opponent.
    X,
    /// The automated player.
    O,
}

impl Player {
    /// Mark the engine plays with.
    pub const AI: Player = Player::O;

    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Wire symbol for this mark.
    pub fn symbol(self) -> &'static str {
        match self {
            Player::X => "X",
            Player::O => "O",
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
    /// Square holding a token that is neither mark nor empty.
    ///
    /// Never selected as a move and never counted as a match.
    Unrecognized,
}

impl Square {
    /// Checks if the square is free to play.
    pub fn is_empty(self) -> bool {
        matches!(self, Square::Empty)
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Creates a board from three rows of squares.
    pub fn from_rows(rows: [[Square; 3]; 3]) -> Self {
        let mut board = Self::new();
        for (row, squares) in rows.iter().enumerate() {
            for (col, square) in squares.iter().enumerate() {
                board.squares[row * 3 + col] = *square;
            }
        }
        board
    }

    /// Gets the square at (row, col).
    ///
    /// Coordinates outside the grid read as empty.
    pub fn get(&self, row: usize, col: usize) -> Square {
        if row < 3 && col < 3 {
            self.squares[row * 3 + col]
        } else {
            Square::Empty
        }
    }

    /// Sets the square at (row, col).
    pub fn set(&mut self, row: usize, col: usize, square: Square) -> Result<(), &'static str> {
        if row >= 3 || col >= 3 {
            return Err("Position out of bounds");
        }
        self.squares[row * 3 + col] = square;
        Ok(())
    }

    /// Checks if the square at (row, col) is empty.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_empty()
    }

    /// Returns row `i` as a line.
    pub fn row(&self, i: usize) -> [Square; 3] {
        [self.get(i, 0), self.get(i, 1), self.get(i, 2)]
    }

    /// Returns column `i` as a line.
    pub fn column(&self, i: usize) -> [Square; 3] {
        [self.get(0, i), self.get(1, i), self.get(2, i)]
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let symbol = match self.get(row, col) {
                    Square::Empty => ".",
                    Square::Occupied(player) => player.symbol(),
                    Square::Unrecognized => "?",
                };
                result.push_str(symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }

    /// Renders the board as a JSON grid of `"X"`, `"O"` and `null`.
    ///
    /// Unrecognized squares render as `"?"`.
    pub fn to_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = (0..3)
            .map(|row| {
                self.row(row)
                    .iter()
                    .map(|square| match square {
                        Square::Empty => serde_json::Value::Null,
                        Square::Occupied(player) => player.symbol().into(),
                        Square::Unrecognized => "?".into(),
                    })
                    .collect()
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}

/// A target cell, as (row, column).
///
/// Coordinates are signed and unbounded so that an accepted external
/// suggestion passes through unchanged; engine-produced moves are always
/// within [0, 2].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Row index.
    #[serde(rename = "linha", alias = "row")]
    row: i64,
    /// Column index.
    #[serde(rename = "coluna", alias = "col", alias = "column")]
    col: i64,
}

impl Move {
    /// Creates a move.
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Creates a move from grid indices.
    pub fn at(row: usize, col: usize) -> Self {
        Self::new(row as i64, col as i64)
    }

    /// Row index.
    pub fn row(&self) -> i64 {
        self.row
    }

    /// Column index.
    pub fn col(&self) -> i64 {
        self.col
    }

    /// Grid indices, if both coordinates are on the board.
    pub fn cell(&self) -> Option<(usize, usize)> {
        let row = usize::try_from(self.row).ok().filter(|r| *r < 3)?;
        let col = usize::try_from(self.col).ok().filter(|c| *c < 3)?;
        Some((row, col))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Difficulty tier gating which heuristic branches are active.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Mostly random play, never blocks.
    #[strum(to_string = "easy", serialize = "facil")]
    Easy,
    /// Wins, blocks, then takes center or a corner.
    #[default]
    #[strum(to_string = "medium", serialize = "medio")]
    Medium,
    /// Same policy tree as medium.
    #[strum(to_string = "hard", serialize = "dificil")]
    Hard,
    /// A name that matched no tier: wins and blocks, then plays randomly.
    #[strum(to_string = "unrecognized")]
    Unrecognized,
}

impl Difficulty {
    /// Maps free-form input to a tier.
    ///
    /// Absent input is [`Difficulty::Medium`]. Any other unmatched name is
    /// [`Difficulty::Unrecognized`]. Matching is exact.
    #[instrument]
    pub fn normalize(input: Option<&str>) -> Self {
        match input {
            None => Difficulty::Medium,
            Some(name) => name.parse().unwrap_or(Difficulty::Unrecognized),
        }
    }

    /// Whether the positional strategy (center, corners) applies.
    pub fn uses_position(self) -> bool {
        matches!(self, Difficulty::Medium | Difficulty::Hard)
    }

    /// Whether the opponent's open lines are blocked.
    pub fn blocks(self) -> bool {
        self != Difficulty::Easy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_out_of_range_reads_empty() {
        let mut board = Board::new();
        board.set(2, 2, Square::Occupied(Player::X)).unwrap();
        assert_eq!(board.get(2, 2), Square::Occupied(Player::X));
        assert_eq!(board.get(3, 0), Square::Empty);
        assert!(board.set(0, 3, Square::Unrecognized).is_err());
    }

    #[test]
    fn test_column_and_row_lines() {
        let board = Board::from_rows([
            [Square::Occupied(Player::X), Square::Empty, Square::Empty],
            [Square::Occupied(Player::O), Square::Unrecognized, Square::Empty],
            [Square::Empty, Square::Empty, Square::Occupied(Player::X)],
        ]);
        assert_eq!(
            board.column(0),
            [
                Square::Occupied(Player::X),
                Square::Occupied(Player::O),
                Square::Empty
            ]
        );
        assert_eq!(board.row(1)[1], Square::Unrecognized);
    }

    #[test]
    fn test_board_json() {
        let mut board = Board::new();
        board.set(0, 1, Square::Occupied(Player::O)).unwrap();
        let json = board.to_json();
        assert_eq!(json[0][1], "O");
        assert!(json[2][2].is_null());
    }

    #[test]
    fn test_move_cell_bounds() {
        assert_eq!(Move::new(1, 2).cell(), Some((1, 2)));
        assert_eq!(Move::new(3, 0).cell(), None);
        assert_eq!(Move::new(-1, 0).cell(), None);
    }

    #[test]
    fn test_move_wire_names() {
        let json = serde_json::to_value(Move::at(0, 2)).unwrap();
        assert_eq!(json, serde_json::json!({"linha": 0, "coluna": 2}));
        let parsed: Move = serde_json::from_str(r#"{"row": 1, "col": 1}"#).unwrap();
        assert_eq!(parsed, Move::at(1, 1));
    }

    #[test]
    fn test_difficulty_normalize() {
        assert_eq!(Difficulty::normalize(Some("facil")), Difficulty::Easy);
        assert_eq!(Difficulty::normalize(Some("easy")), Difficulty::Easy);
        assert_eq!(Difficulty::normalize(Some("medio")), Difficulty::Medium);
        assert_eq!(Difficulty::normalize(Some("dificil")), Difficulty::Hard);
        assert_eq!(Difficulty::normalize(Some("hard")), Difficulty::Hard);
        assert_eq!(Difficulty::normalize(Some("nightmare")), Difficulty::Unrecognized);
        assert_eq!(Difficulty::normalize(Some("Facil")), Difficulty::Unrecognized);
        assert_eq!(Difficulty::normalize(Some("")), Difficulty::Unrecognized);
        assert_eq!(Difficulty::normalize(None), Difficulty::Medium);
    }
}
