//! Main application entry point (server binary).
//!
//! This is a thin wrapper around the `speed_check` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use speed_check::initialization::init_logger_with;
use speed_check::{run_server, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load GEO_API_KEY and friends from .env in the working directory or next
    // to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    if let Err(e) = run_server(config).await {
        eprintln!("speed_check error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
