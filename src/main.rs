//! Stockpile - headless client for the inventory manager
//!
//! This is the binary entry point. Flags and settings resolve here; the
//! command loop lives in the shell module.

use std::path::PathBuf;

use clap::Parser;

use stockpile_app::Settings;
use stockpile_core::prelude::*;

mod shell;

/// Headless client for the Stockpile inventory manager
#[derive(Parser, Debug)]
#[command(name = "stockpile")]
#[command(about = "Headless client for the Stockpile inventory manager", long_about = None)]
struct Args {
    /// Base URL of the inventory API (overrides the config file and STOCKPILE_API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }

    stockpile_core::logging::init(settings.log_dir.clone())?;
    info!("API base URL: {}", settings.api_url);

    shell::run(settings).await
}
