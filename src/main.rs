//! Main entry point for the application.
//!
//! This module initializes logging, loads environment variables and settings,
//! and then either starts the interactive menu or runs a single action.
//!
//! Missing credentials abort startup. Every failure after that is reported to
//! the user and, in interactive mode, the menu keeps running.

mod cli;
mod config;
mod constants;
mod embedding;
mod errors;
mod pipeline;
mod recruit;
mod text;
mod ui;
mod utils;

use clap::Parser;
use cli::Command;
use colored::*;
use std::process::ExitCode;
use tracing::{error, info};
use ui::{App, RawPanel};

/// Main entry point that initializes and runs the application.
///
/// # Initialization steps:
/// 1. Parse CLI arguments
/// 2. Initialize logging system
/// 3. Load environment variables
/// 4. Load settings and credentials (fatal on failure)
/// 5. Run the interactive menu or the requested action
#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    utils::init_logging(&cli.logging_level, cli.log_file);

    if let Err(e) = dotenvy::dotenv() {
        info!("No .env file loaded: {}", e);
    }

    let app = config::load_settings(cli.config.as_deref()).and_then(|settings| {
        let credentials = config::Credentials::from_env()?;
        App::new(&settings, &credentials)
    });
    let mut app = match app {
        Ok(app) => app,
        Err(e) => {
            error!("Startup failed: {}", e);
            eprintln!("{} {}", "✗".red(), e.to_string().red());
            return ExitCode::FAILURE;
        }
    };

    let ok = match cli.command {
        None => {
            app.run_interactive().await;
            true
        }
        Some(Command::Fetch { job_id, raw }) => {
            let panel = if raw { RawPanel::Show } else { RawPanel::Hide };
            app.fetch_job(&job_id, panel).await
        }
        Some(Command::Embed { job_id }) => app.embed_job(&job_id).await,
        Some(Command::Token { code }) => app.exchange_code(&code).await,
        Some(Command::Check) => app.check_embedding().await,
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
