//! Suggestion provider backed by a language model.

use crate::llm_client::LlmClient;
use serde_json::Value;
use tictactoe_ai::{Board, Player, Suggestion, SuggestionError, SuggestionProvider};
use tracing::{debug, instrument, warn};

const SYSTEM_PROMPT: &str = "You are a tic-tac-toe player. Choose the best move to win or draw.";

/// Builds the user prompt describing the board and our mark.
pub fn build_prompt(board: &Board, player: Player) -> String {
    format!(
        "Current board (3x3, with 'X', 'O' or null):\n{}\n\
         Your symbol is '{}'.\n\
         Rows and columns are numbered 0 to 2.\n\
         Respond ONLY with JSON in the format: {{\"row\": r, \"col\": c}}",
        board.to_json(),
        player.symbol()
    )
}

/// Turns generated text into a suggestion.
///
/// Tries the whole text as JSON first, then the last `{...}` span in it.
#[instrument(skip(text), fields(text_length = text.len()))]
pub fn parse_suggestion_text(text: &str) -> Result<Suggestion, SuggestionError> {
    if let Ok(value) = serde_json::from_str::<Value>(text.trim()) {
        return Ok(Suggestion::new(value));
    }

    let span = text
        .rfind('{')
        .and_then(|start| text[start..].find('}').map(|len| &text[start..=start + len]))
        .ok_or_else(|| SuggestionError::new("No JSON object in generated text"))?;

    debug!(span, "Parsing embedded JSON object");
    serde_json::from_str::<Value>(span)
        .map(Suggestion::new)
        .map_err(|e| SuggestionError::new(format!("Generated text is not JSON: {}", e)))
}

/// Asks a language model for a move.
#[derive(Debug, Clone)]
pub struct LlmSuggestionProvider {
    client: LlmClient,
}

impl LlmSuggestionProvider {
    /// Creates a provider using `client`.
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl SuggestionProvider for LlmSuggestionProvider {
    #[instrument(skip(self, board), fields(model = %self.client.config().model()))]
    async fn suggest(&self, board: &Board, player: Player) -> Result<Suggestion, SuggestionError> {
        let prompt = build_prompt(board, player);
        let text = self
            .client
            .generate(SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| {
                warn!(error = %e, "LLM request failed");
                SuggestionError::new(e.message)
            })?;
        debug!(text = %text, "LLM responded");
        parse_suggestion_text(&text)
    }

    fn name(&self) -> &str {
        "llm"
    }
}
