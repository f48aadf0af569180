use chrono::{NaiveTime, Weekday};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use weekplan::components::schedule::{GamingFrequency, Preference};
use weekplan::utils::time::parse_time;

#[derive(Debug, Parser)]
#[command(name = "weekplan", version, about = "Plan your week with Gemini on top of Google Calendar")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the coming week of the source calendar
    Fetch {
        /// Calendar to read instead of SOURCE_CALENDAR_ID
        #[arg(long)]
        calendar: Option<String>,
        /// Maximum number of events to read
        #[arg(long)]
        max_results: Option<u32>,
    },
    /// Generate a plan for the coming week
    Plan(PlanArgs),
    /// Push a saved plan to the target calendar, replacing its contents
    Push {
        /// Plan file written by `plan --save`
        #[arg(long)]
        from: PathBuf,
    },
    /// Put a weekly activity on the target calendar
    AddConstant(ConstantArgs),
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// morning, night or neither
    #[arg(long)]
    pub preference: Option<Preference>,
    /// Exercise sessions per week
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=7))]
    pub exercise: Option<u8>,
    /// Make room for friends and social activities
    #[arg(long)]
    pub social: bool,
    /// How often you game, e.g. "few-times-a-week"
    #[arg(long)]
    pub gaming: Option<GamingFrequency>,
    /// Make room for study sessions
    #[arg(long)]
    pub study: bool,
    /// Additional wish for the plan, may be repeated
    #[arg(long = "note")]
    pub notes: Vec<String>,
    /// Write the plan to a file
    #[arg(long)]
    pub save: Option<PathBuf>,
    /// Push the plan to the target calendar
    #[arg(long)]
    pub push: bool,
}

#[derive(Debug, Args)]
pub struct ConstantArgs {
    /// Activity name, e.g. "Piano practice"
    #[arg(long)]
    pub name: String,
    /// Day of week, e.g. "tuesday"
    #[arg(long)]
    pub day: Weekday,
    /// Start time (HH:MM)
    #[arg(long, value_parser = clock_time)]
    pub start: NaiveTime,
    /// End time (HH:MM)
    #[arg(long, value_parser = clock_time)]
    pub end: NaiveTime,
    #[arg(long)]
    pub location: Option<String>,
}

fn clock_time(value: &str) -> Result<NaiveTime, String> {
    parse_time(value).ok_or_else(|| format!("'{}' is not a time in HH:MM format", value))
}
