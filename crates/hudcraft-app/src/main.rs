//! Main application entry point.

use anyhow::Result;
use clap::Parser;
use hudcraft_app::{AppConfig, Cli, commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();
    log::debug!("Starting HUDCraft");

    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    commands::run(cli.command, &config)
}
