use crate::cli::Cli;
use crate::commands::{self, CommandContext};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use weekplan::config::Config;
use weekplan::error::Error;

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn,rig=warn")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Run the requested command
pub async fn run(cli: Cli, config: Config) -> miette::Result<()> {
    let ctx = CommandContext::new(config)?;
    info!("Planning in timezone {}", ctx.zone);

    commands::dispatch(&ctx, cli.command).await?;
    Ok(())
}
