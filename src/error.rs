use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the planner
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(weekplan::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(weekplan::config))]
    Config(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(weekplan::google_calendar))]
    GoogleCalendar(String),

    #[error("Schedule generation error: {0}")]
    #[diagnostic(code(weekplan::generation))]
    Generation(String),

    #[error("Parse error: {0}")]
    #[diagnostic(code(weekplan::parse))]
    Parse(String),

    #[error(transparent)]
    #[diagnostic(code(weekplan::io))]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    #[diagnostic(code(weekplan::http))]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(weekplan::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(weekplan::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for JSON errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type PlannerResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}

/// Helper to create schedule generation errors
pub fn generation_error(message: &str) -> Error {
    Error::Generation(message.to_string())
}

/// Helper to create parse errors
pub fn parse_error(message: &str) -> Error {
    Error::Parse(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
