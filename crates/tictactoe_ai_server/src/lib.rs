//! HTTP server and language-model collaborator for the tic-tac-toe move engine.
//!
//! # Architecture
//!
//! - **Routes**: `POST /api/move` decodes the board and difficulty, returns a move
//! - **Board input**: turns the loosely-typed JSON grid into a [`tictactoe_ai::Board`]
//! - **Provider**: asks an LLM for a suggestion and parses its text
//! - **LLM client**: HuggingFace, OpenAI and Anthropic backends
//! - **Config**: TOML file plus API keys from the environment

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board_input;
mod config;
mod llm_client;
mod provider;
mod routes;

/// Command-line definitions for the server binary.
pub mod cli;

// Crate-level exports - Board decoding
pub use board_input::{BoardError, decode_board};

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - LLM client
pub use llm_client::{
    HUGGINGFACE_INFERENCE_URL, LlmClient, LlmConfig, LlmError, LlmProvider, huggingface_text,
};

// Crate-level exports - Suggestion provider
pub use provider::{LlmSuggestionProvider, build_prompt, parse_suggestion_text};

// Crate-level exports - HTTP surface
pub use routes::{ApiError, AppState, MoveRequest, router};
