mod cli;
mod commands;
mod startup;

use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging
    startup::init_logging()?;

    info!("Starting weekplan");

    // Load configuration
    let config = startup::load_config()?;

    startup::run(cli, config).await
}
