//! HTTP surface: decodes requests, asks the selector, encodes the move.

use crate::board_input::{BoardError, decode_board};
use axum::{
    Json, Router,
    body::Body,
    extract::{State, rejection::JsonRejection},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use derive_more::{Display, From};
use rand::{SeedableRng, rngs::StdRng};
use serde::Deserialize;
use serde_json::{Value, json};
use tictactoe_ai::{Difficulty, Move, MoveSelector};
use tower::ServiceBuilder;
use tracing::{info, instrument, warn};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    selector: MoveSelector,
}

impl AppState {
    /// Creates state around a configured selector.
    pub fn new(selector: MoveSelector) -> Self {
        Self { selector }
    }
}

/// Body of a move request.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveRequest {
    /// Board grid, or a string holding the grid as JSON.
    #[serde(default, rename = "tabuleiro", alias = "board")]
    pub board: Option<Value>,
    /// Difficulty name; absent or null plays as medium.
    #[serde(default, rename = "nivel", alias = "difficulty")]
    pub difficulty: Option<Value>,
}

/// Request failures reported to the client.
#[derive(Debug, Display, From)]
pub enum ApiError {
    /// The body is not a JSON object with the expected fields.
    #[display("Invalid request body: {}", _0.body_text())]
    InvalidRequest(JsonRejection),
    /// The board could not be decoded.
    #[display("Invalid board format: {}", _0.message)]
    InvalidBoard(BoardError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) | ApiError::InvalidBoard(_) => StatusCode::BAD_REQUEST,
        };
        warn!(error = %self, %status, "Rejecting request");
        (status, Json(json!({ "erro": self.to_string() }))).into_response()
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/move", post(ai_move))
        .route("/health", get(health))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(state)
}

/// Chooses the automated player's next move.
#[instrument(skip(state, payload))]
async fn ai_move(
    State(state): State<AppState>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<Move>, ApiError> {
    let Json(request) = payload?;
    let board = match &request.board {
        Some(value) => decode_board(value)?,
        None => return Err(BoardError::new("missing board").into()),
    };
    let difficulty = requested_difficulty(request.difficulty.as_ref());
    info!(%difficulty, board = %board.display(), "Move requested");

    let mut rng = StdRng::from_entropy();
    let choice = state.selector.select_move(&board, difficulty, &mut rng).await;
    info!(row = choice.row(), col = choice.col(), "Move chosen");
    Ok(Json(choice))
}

/// Absent or null is medium; a non-string value names no tier.
fn requested_difficulty(value: Option<&Value>) -> Difficulty {
    match value {
        None | Some(Value::Null) => Difficulty::normalize(None),
        Some(Value::String(name)) => Difficulty::normalize(Some(name.as_str())),
        Some(_) => Difficulty::Unrecognized,
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
