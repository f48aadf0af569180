use crate::cli::Command;
use chrono_tz::Tz;
use weekplan::components::google_calendar::{GoogleCalendarClient, TokenManager, WriteTarget};
use weekplan::components::schedule::GeminiGenerator;
use weekplan::config::Config;
use weekplan::error::PlannerResult;

// Export submodules
pub mod calendar;
pub mod plan;

/// Shared context for all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: Config,
    pub zone: Tz,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(config: Config) -> PlannerResult<Self> {
        let zone = config.zone()?;
        Ok(Self { config, zone })
    }

    pub fn calendar_api(&self) -> PlannerResult<GoogleCalendarClient> {
        GoogleCalendarClient::new(TokenManager::new(&self.config))
    }

    pub fn generator(&self) -> PlannerResult<GeminiGenerator> {
        let api_key = self.config.require_gemini_key()?;
        Ok(GeminiGenerator::new(api_key, self.config.gemini_model.clone()))
    }

    pub fn write_target(&self) -> WriteTarget {
        WriteTarget::new(self.config.target_calendar_name.clone(), self.zone)
    }
}

/// Type alias for command result
pub type CommandResult = PlannerResult<()>;

/// Run one command
pub async fn dispatch(ctx: &CommandContext, command: Command) -> CommandResult {
    match command {
        Command::Fetch {
            calendar,
            max_results,
        } => calendar::fetch(ctx, calendar, max_results).await,
        Command::Plan(args) => plan::plan(ctx, args).await,
        Command::Push { from } => plan::push_saved(ctx, &from).await,
        Command::AddConstant(args) => plan::add_constant(ctx, args).await,
    }
}
