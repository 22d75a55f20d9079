//! The outside source of candidate moves.

use crate::{Board, Player, Suggestion};
use derive_more::{Display, Error};
use tracing::{debug, instrument};

/// Something that can propose a move for `player` on `board`.
///
/// Implementations own their transport, retries and parsing. The engine
/// treats any error as "no suggestion".
#[async_trait::async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Proposes a move.
    async fn suggest(&self, board: &Board, player: Player) -> Result<Suggestion, SuggestionError>;

    /// Provider name for logs.
    fn name(&self) -> &str;
}

/// Provider that never has a suggestion.
///
/// Makes the selector rely on the local heuristic alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSuggestions;

#[async_trait::async_trait]
impl SuggestionProvider for NoSuggestions {
    #[instrument(skip(self, _board))]
    async fn suggest(&self, _board: &Board, _player: Player) -> Result<Suggestion, SuggestionError> {
        debug!("Offline provider, no suggestion");
        Err(SuggestionError::new("No suggestion provider configured"))
    }

    fn name(&self) -> &str {
        "offline"
    }
}

/// Suggestion provider failure.
#[derive(Debug, Clone, Display, Error)]
#[display("Suggestion error: {} at {}:{}", message, file, line)]
pub struct SuggestionError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SuggestionError {
    /// Creates a new suggestion error with caller location tracking.
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
