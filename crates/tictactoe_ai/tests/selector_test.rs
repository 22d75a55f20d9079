//! Tests for move selection with stubbed suggestion providers.

use rand::{SeedableRng, rngs::StdRng};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tictactoe_ai::{
    Board, Difficulty, Move, MoveSelector, NoSuggestions, Player, Square, Suggestion,
    SuggestionError, SuggestionProvider,
};

const X: Square = Square::Occupied(Player::X);
const O: Square = Square::Occupied(Player::O);
const E: Square = Square::Empty;

/// Returns a fixed JSON value and counts calls.
struct FixedProvider {
    value: serde_json::Value,
    calls: AtomicUsize,
}

impl FixedProvider {
    fn new(value: serde_json::Value) -> Arc<Self> {
        Arc::new(Self {
            value,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SuggestionProvider for FixedProvider {
    async fn suggest(&self, _board: &Board, player: Player) -> Result<Suggestion, SuggestionError> {
        assert_eq!(player, Player::O);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Suggestion::new(self.value.clone()))
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Never answers.
struct StalledProvider;

#[async_trait::async_trait]
impl SuggestionProvider for StalledProvider {
    async fn suggest(&self, _board: &Board, _player: Player) -> Result<Suggestion, SuggestionError> {
        std::future::pending().await
    }

    fn name(&self) -> &str {
        "stalled"
    }
}

#[tokio::test]
async fn test_valid_suggestion_is_used() {
    let provider = FixedProvider::new(json!({"linha": 2, "coluna": 2}));
    let selector = MoveSelector::new(provider.clone());
    let mut rng = StdRng::seed_from_u64(1);

    let choice = selector
        .select_move(&Board::new(), Difficulty::Hard, &mut rng)
        .await;
    assert_eq!(choice, Move::at(2, 2));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_occupied_suggestion_falls_back() {
    let board = Board::from_rows([[E, X, E], [E, E, E], [E, E, E]]);
    let provider = FixedProvider::new(json!({"linha": 0, "coluna": 1}));
    let selector = MoveSelector::new(provider);
    let mut rng = StdRng::seed_from_u64(2);

    let choice = selector.select_move(&board, Difficulty::Medium, &mut rng).await;
    assert_eq!(choice, Move::at(1, 1));
}

#[tokio::test]
async fn test_malformed_suggestion_falls_back_to_block() {
    let board = Board::from_rows([[X, X, E], [E, O, E], [E, E, E]]);
    let provider = FixedProvider::new(json!({"move": "top right"}));
    let selector = MoveSelector::new(provider);
    let mut rng = StdRng::seed_from_u64(3);

    let choice = selector.select_move(&board, Difficulty::Hard, &mut rng).await;
    assert_eq!(choice, Move::at(0, 2));
}

#[tokio::test]
async fn test_off_board_suggestion_passes_through() {
    let provider = FixedProvider::new(json!({"linha": 7, "coluna": 1}));
    let selector = MoveSelector::new(provider);
    let mut rng = StdRng::seed_from_u64(4);

    let choice = selector
        .select_move(&Board::new(), Difficulty::Medium, &mut rng)
        .await;
    assert_eq!(choice, Move::new(7, 1));
}

#[tokio::test]
async fn test_offline_provider_uses_heuristic() {
    let selector = MoveSelector::new(Arc::new(NoSuggestions));
    let mut rng = StdRng::seed_from_u64(5);

    let choice = selector
        .select_move(&Board::new(), Difficulty::Medium, &mut rng)
        .await;
    assert_eq!(choice, Move::at(1, 1));
}

#[tokio::test]
async fn test_stalled_provider_times_out() {
    let selector =
        MoveSelector::new(Arc::new(StalledProvider)).with_timeout(Duration::from_millis(20));
    let board = Board::from_rows([[O, O, E], [X, X, E], [E, E, E]]);
    let mut rng = StdRng::seed_from_u64(6);

    let choice = selector.select_move(&board, Difficulty::Hard, &mut rng).await;
    assert_eq!(choice, Move::at(0, 2));
}

#[tokio::test]
async fn test_easy_mostly_skips_provider() {
    let provider = FixedProvider::new(json!({"linha": 0, "coluna": 0}));
    let selector = MoveSelector::new(provider.clone());
    let mut rng = StdRng::seed_from_u64(7);
    let rounds = 400;

    for _ in 0..rounds {
        let choice = selector
            .select_move(&Board::new(), Difficulty::Easy, &mut rng)
            .await;
        assert!(choice.cell().is_some());
    }

    // About 30% of easy turns consult the provider.
    let calls = provider.calls();
    assert!(calls > rounds / 10, "provider called {calls} times");
    assert!(calls < rounds / 2, "provider called {calls} times");
}

#[tokio::test]
async fn test_non_easy_always_asks_provider() {
    let provider = FixedProvider::new(json!(null));
    let selector = MoveSelector::new(provider.clone());
    let mut rng = StdRng::seed_from_u64(8);

    for difficulty in [Difficulty::Medium, Difficulty::Hard] {
        selector.select_move(&Board::new(), difficulty, &mut rng).await;
    }
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_easy_rejected_suggestion_neither_blocks_nor_positions() {
    let board = Board::from_rows([[X, X, E], [E, E, E], [E, E, E]]);
    let provider = FixedProvider::new(json!({"linha": 0, "coluna": 0}));
    let selector = MoveSelector::new(provider.clone());
    let mut rng = StdRng::seed_from_u64(9);

    let mut choices = Vec::new();
    for _ in 0..200 {
        choices.push(selector.select_move(&board, Difficulty::Easy, &mut rng).await);
    }

    assert!(provider.calls() > 0, "some easy turns must reach the provider");
    for choice in &choices {
        let (row, col) = choice.cell().expect("fallback moves stay on the board");
        assert!(board.is_empty(row, col), "played occupied square {choice}");
    }
    assert!(choices.iter().any(|choice| *choice != Move::at(0, 2)));
}

#[tokio::test]
async fn test_unrecognized_difficulty_rejected_suggestion_blocks() {
    let board = Board::from_rows([[X, X, E], [E, E, E], [E, E, E]]);
    let provider = FixedProvider::new(json!({"linha": 0, "coluna": 1}));
    let selector = MoveSelector::new(provider.clone());
    let mut rng = StdRng::seed_from_u64(10);

    let difficulty = Difficulty::normalize(Some("impossivel"));
    let choice = selector.select_move(&board, difficulty, &mut rng).await;
    assert_eq!(choice, Move::at(0, 2));
    assert_eq!(provider.calls(), 1);
}
