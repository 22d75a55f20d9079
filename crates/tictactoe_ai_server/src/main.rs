//! Tic-tac-toe AI move server.

use anyhow::Result;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use std::sync::Arc;
use tictactoe_ai::{Difficulty, MoveSelector, NoSuggestions, SuggestionProvider};
use tictactoe_ai_server::cli::{Cli, Command};
use tictactoe_ai_server::{
    AppState, LlmClient, LlmSuggestionProvider, ServerConfig, decode_board, router,
};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tictactoe_ai=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve {
            config,
            port,
            host,
            offline,
        } => {
            let config = ServerConfig::load_or_default(&config)?
                .with_address(host, port)
                .with_offline(offline);
            run_server(config).await
        }
        Command::Decide {
            board,
            difficulty,
            seed,
        } => run_decide(&board, difficulty.as_deref(), seed).await,
    }
}

/// Picks the suggestion provider for this config.
///
/// A missing API key degrades to the offline provider instead of failing.
#[instrument(skip(config), fields(provider = ?config.llm_provider()))]
fn build_provider(config: &ServerConfig) -> Arc<dyn SuggestionProvider> {
    if *config.offline() {
        info!("Offline mode, using local heuristic only");
        return Arc::new(NoSuggestions);
    }

    match config.create_llm_config() {
        Ok(llm_config) => Arc::new(LlmSuggestionProvider::new(LlmClient::new(llm_config))),
        Err(e) => {
            warn!(error = %e, "LLM unavailable, using local heuristic only");
            Arc::new(NoSuggestions)
        }
    }
}

/// Run the HTTP move server
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
async fn run_server(config: ServerConfig) -> Result<()> {
    let selector =
        MoveSelector::new(build_provider(&config)).with_timeout(config.suggestion_timeout());
    let app = router(AppState::new(selector));

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!("Server ready at http://{}:{}/", config.host(), config.port());

    axum::serve(listener, app).await?;
    Ok(())
}

/// Decide a single move with the local heuristic and print it
#[instrument(skip(board))]
async fn run_decide(board: &str, difficulty: Option<&str>, seed: Option<u64>) -> Result<()> {
    let value: serde_json::Value = serde_json::from_str(board)?;
    let board = decode_board(&value)?;
    let difficulty = Difficulty::normalize(difficulty);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let choice = MoveSelector::default()
        .select_move(&board, difficulty, &mut rng)
        .await;
    println!("{}", serde_json::to_string(&choice)?);
    Ok(())
}
