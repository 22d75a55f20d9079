//! Top-level move selection: easy-mode dice roll, outside suggestion, local fallback.

use crate::engine::{decide, random_empty};
use crate::provider::{NoSuggestions, SuggestionProvider};
use crate::suggestion::validate;
use crate::{Board, Difficulty, Move, Player};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Chance that easy mode plays a random square without asking the provider.
pub const EASY_RANDOM_PROBABILITY: f64 = 0.70;

/// Default bound on a single provider call.
pub const DEFAULT_SUGGESTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Picks the next move for [`Player::AI`].
///
/// Stateless across calls. Always produces a move: provider failures,
/// timeouts and illegal suggestions fall back to the local heuristic.
#[derive(Clone)]
pub struct MoveSelector {
    provider: Arc<dyn SuggestionProvider>,
    timeout: Duration,
}

impl std::fmt::Debug for MoveSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveSelector")
            .field("provider", &self.provider.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::new(Arc::new(NoSuggestions))
    }
}

impl MoveSelector {
    /// Creates a selector backed by `provider`.
    #[instrument(skip(provider), fields(provider = %provider.name()))]
    pub fn new(provider: Arc<dyn SuggestionProvider>) -> Self {
        info!("Creating move selector");
        Self {
            provider,
            timeout: DEFAULT_SUGGESTION_TIMEOUT,
        }
    }

    /// Sets the bound on a single provider call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Chooses a move for `board` at `difficulty`.
    #[instrument(skip(self, board, rng), fields(provider = %self.provider.name()))]
    pub async fn select_move<R: Rng + Send + ?Sized>(
        &self,
        board: &Board,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Move {
        if difficulty == Difficulty::Easy && rng.gen_bool(EASY_RANDOM_PROBABILITY) {
            let choice = random_empty(board, rng);
            debug!(choice = %choice, "Easy mode random move");
            return choice;
        }

        let suggestion = match tokio::time::timeout(
            self.timeout,
            self.provider.suggest(board, Player::AI),
        )
        .await
        {
            Ok(Ok(suggestion)) => Some(suggestion),
            Ok(Err(e)) => {
                warn!(error = %e, "Suggestion provider failed");
                None
            }
            Err(_) => {
                warn!(timeout = ?self.timeout, "Suggestion provider timed out");
                None
            }
        };

        match validate(suggestion.as_ref(), board) {
            Ok(choice) => {
                info!(choice = %choice, "Using provider suggestion");
                choice
            }
            Err(rejection) => {
                info!(%rejection, "Suggestion rejected, using local heuristic");
                decide(board, difficulty, rng)
            }
        }
    }
}
