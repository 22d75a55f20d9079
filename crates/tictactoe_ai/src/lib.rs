//! Move-decision engine for an automated tic-tac-toe player.
//!
//! Given a board and a difficulty, [`MoveSelector::select_move`] always
//! returns one move. It may consult an outside [`SuggestionProvider`]
//! (typically a language model), but every suggestion is validated and
//! anything unusable falls back to a local line heuristic.
//!
//! # Architecture
//!
//! - **Rules**: two-in-a-row detection and line scanning
//! - **Engine**: random play and the difficulty-tiered heuristic
//! - **Suggestion**: validation of untrusted candidate moves
//! - **Selector**: the single entry point tying them together
//!
//! # Example
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use tictactoe_ai::{Board, Difficulty, Move, MoveSelector};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let selector = MoveSelector::default();
//! let mut rng = StdRng::seed_from_u64(42);
//! let choice = selector
//!     .select_move(&Board::new(), Difficulty::Medium, &mut rng)
//!     .await;
//! assert_eq!(choice, Move::at(1, 1));
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod provider;
mod rules;
mod selector;
mod suggestion;
mod types;

pub use engine::{CENTER, CORNERS, FULL_BOARD_FALLBACK, decide, empty_cells, random_empty};
pub use provider::{NoSuggestions, SuggestionError, SuggestionProvider};
pub use rules::{find_completion, has_two_in_line};
pub use selector::{DEFAULT_SUGGESTION_TIMEOUT, EASY_RANDOM_PROBABILITY, MoveSelector};
pub use suggestion::{Rejection, Suggestion, validate};
pub use types::{Board, Difficulty, Move, Player, Square};
