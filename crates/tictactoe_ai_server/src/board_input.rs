//! Decoding of the loosely-typed board payload into a [`Board`].

use derive_more::{Display, Error};
use serde_json::Value;
use tictactoe_ai::{Board, Player, Square};
use tracing::{debug, instrument, warn};

/// Decodes a board from JSON.
///
/// Accepts an array of up to three rows, or a string holding such an array.
/// Each row is an array of up to three cells, or null. Missing rows and
/// cells are empty. `"X"` and `"O"` are marks, null is empty, and any other
/// value is an unrecognized (occupied) square.
#[instrument(skip(value))]
pub fn decode_board(value: &Value) -> Result<Board, BoardError> {
    match value {
        Value::String(text) => {
            debug!("Decoding string-encoded board");
            let inner: Value = serde_json::from_str(text)
                .map_err(|e| BoardError::new(format!("board string is not JSON: {}", e)))?;
            match inner {
                Value::Array(rows) => decode_rows(&rows),
                _ => Err(BoardError::new("board must be an array of rows")),
            }
        }
        Value::Array(rows) => decode_rows(rows),
        _ => Err(BoardError::new("board must be an array of rows")),
    }
}

fn decode_rows(rows: &[Value]) -> Result<Board, BoardError> {
    if rows.len() > 3 {
        return Err(BoardError::new(format!("board has {} rows, expected 3", rows.len())));
    }

    let mut board = Board::new();
    for (row, cells) in rows.iter().enumerate() {
        let cells: &[Value] = match cells {
            Value::Array(cells) => cells.as_slice(),
            Value::Null => &[],
            _ => return Err(BoardError::new(format!("row {} is not an array", row))),
        };
        if cells.len() > 3 {
            return Err(BoardError::new(format!(
                "row {} has {} cells, expected 3",
                row,
                cells.len()
            )));
        }
        for (col, cell) in cells.iter().enumerate() {
            let square = decode_square(cell);
            if square == Square::Unrecognized {
                warn!(row, col, value = %cell, "Unrecognized board token");
            }
            board
                .set(row, col, square)
                .map_err(|e| BoardError::new(e.to_string()))?;
        }
    }
    Ok(board)
}

fn decode_square(cell: &Value) -> Square {
    match cell {
        Value::Null => Square::Empty,
        Value::String(s) if s == "X" => Square::Occupied(Player::X),
        Value::String(s) if s == "O" => Square::Occupied(Player::O),
        _ => Square::Unrecognized,
    }
}

/// The board payload could not be read as a 3x3 grid.
#[derive(Debug, Clone, Display, Error)]
#[display("Board error: {} at {}:{}", message, file, line)]
pub struct BoardError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BoardError {
    /// Creates a new board error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
