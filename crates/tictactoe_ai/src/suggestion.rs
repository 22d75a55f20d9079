//! Validation of moves proposed by an untrusted outside source.

use crate::{Board, Move};
use derive_more::Display;
use serde_json::Value;
use tracing::{debug, instrument, warn};

const ROW_KEYS: [&str; 2] = ["linha", "row"];
const COL_KEYS: [&str; 3] = ["coluna", "col", "column"];

/// A candidate move in unvalidated form.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion(Value);

impl Suggestion {
    /// Wraps whatever the provider parsed.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Suggestion {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// Why a suggestion was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Rejection {
    /// Nothing was suggested.
    #[display("no suggestion")]
    Absent,
    /// The suggestion is not a JSON object.
    #[display("suggestion is not an object")]
    NotAnObject,
    /// A coordinate field is missing or null.
    #[display("missing field `{_0}`")]
    MissingField(&'static str),
    /// A coordinate field is not an integral number.
    #[display("field `{_0}` is not numeric")]
    NotNumeric(&'static str),
    /// A coordinate field is integral but outside the signed 64-bit range.
    #[display("field `{_0}` is out of range")]
    Overflow(&'static str),
    /// The target square is already taken.
    #[display("square {_0} is occupied")]
    Occupied(Move),
}

/// Checks a suggestion for shape and legality.
///
/// Accepts only an object with integral row and column fields whose target
/// square is not occupied. Coordinates are not bounds-checked: a square off
/// the board is never occupied, so such a move is accepted unchanged.
#[instrument(skip(suggestion, board))]
pub fn validate(suggestion: Option<&Suggestion>, board: &Board) -> Result<Move, Rejection> {
    let object = suggestion
        .ok_or(Rejection::Absent)?
        .value()
        .as_object()
        .ok_or(Rejection::NotAnObject)?;

    let row = coordinate(object, &ROW_KEYS)?;
    let col = coordinate(object, &COL_KEYS)?;
    let candidate = Move::new(row, col);

    if let Some((r, c)) = candidate.cell()
        && !board.is_empty(r, c)
    {
        return Err(Rejection::Occupied(candidate));
    }

    if candidate.cell().is_none() {
        warn!(candidate = %candidate, "Accepting off-board suggestion unchanged");
    }
    debug!(candidate = %candidate, "Suggestion accepted");
    Ok(candidate)
}

fn coordinate(
    object: &serde_json::Map<String, Value>,
    keys: &[&'static str],
) -> Result<i64, Rejection> {
    let (key, value) = keys
        .iter()
        .find_map(|key| {
            object
                .get(*key)
                .filter(|value| !value.is_null())
                .map(|value| (*key, value))
        })
        .ok_or(Rejection::MissingField(keys[0]))?;
    as_integer(value, key)
}

fn as_integer(value: &Value, key: &'static str) -> Result<i64, Rejection> {
    let number = match value {
        Value::Number(number) => match number.as_i64() {
            Some(exact) => return Ok(exact),
            None => number.as_f64(),
        },
        Value::String(text) => {
            let text = text.trim();
            if let Ok(exact) = text.parse::<i64>() {
                return Ok(exact);
            }
            text.parse::<f64>().ok()
        }
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() && n.fract() == 0.0 => {
            if n.abs() < i64::MAX as f64 {
                Ok(n as i64)
            } else {
                Err(Rejection::Overflow(key))
            }
        }
        _ => Err(Rejection::NotNumeric(key)),
    }
}
