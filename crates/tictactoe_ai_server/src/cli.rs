//! Command-line interface for tictactoe_ai_server.

use clap::{Parser, Subcommand};

/// Tic-tac-toe AI move server
#[derive(Parser, Debug)]
#[command(name = "tictactoe_ai_server")]
#[command(about = "Picks the next move for an automated tic-tac-toe player", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP move server
    Serve {
        /// Path to the TOML config file (defaults are used if missing)
        #[arg(short, long, default_value = "tictactoe_ai.toml")]
        config: std::path::PathBuf,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Never call the language model
        #[arg(long)]
        offline: bool,
    },

    /// Decide one move locally and print it as JSON
    Decide {
        /// Board as JSON, e.g. '[["X",null,null],[null,null,null],[null,null,null]]'
        board: String,

        /// Difficulty (easy/facil, medium/medio, hard/dificil)
        #[arg(short, long)]
        difficulty: Option<String>,

        /// Seed for reproducible random choices
        #[arg(long)]
        seed: Option<u64>,
    },
}
