use crate::components::schedule::PlannerProfile;
use crate::error::{config_error, env_error, PlannerResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use std::env;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Timezone every event is expressed in unless `TIMEZONE` says otherwise
pub const DEFAULT_TIMEZONE: &str = "Europe/Stockholm";

/// Display name of the calendar plans are pushed to
pub const DEFAULT_TARGET_CALENDAR: &str = "Gemini Schedule";

/// Upper bound on events fetched from the source calendar
pub const DEFAULT_MAX_RESULTS: u32 = 30;

/// Location of the stored planning profile
pub const PROFILE_PATH: &str = "config/profile.toml";

/// Main configuration structure for the planner
#[derive(Debug, Clone)]
pub struct Config {
    /// Google OAuth client ID
    pub google_client_id: String,
    /// Google OAuth client secret
    pub google_client_secret: String,
    /// Calendar whose events are read as fixed commitments
    pub source_calendar_id: String,
    /// IANA name of the planner's timezone
    pub timezone: String,
    /// Gemini API key, only needed for planning
    pub gemini_api_key: Option<String>,
    /// Gemini model identifier
    pub gemini_model: String,
    /// Display name of the calendar plans are written to
    pub target_calendar_name: String,
    /// Maximum number of source events to read
    pub max_results: u32,
    /// File holding the OAuth token
    pub token_file: String,
    /// Stored preference and activity defaults
    pub profile: PlannerProfile,
}

impl Config {
    /// Load configuration from environment and profile file
    pub fn load() -> PlannerResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Self::from_lookup(|key| env::var(key).ok())?;
        config.profile = load_profile(Path::new(PROFILE_PATH))?;
        Ok(config)
    }

    /// Build configuration from a variable lookup, with an empty profile
    pub fn from_lookup<F>(lookup: F) -> PlannerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        // Required variables
        let google_client_id = var("GOOGLE_CLIENT_ID").ok_or_else(|| env_error("GOOGLE_CLIENT_ID"))?;
        let google_client_secret =
            var("GOOGLE_CLIENT_SECRET").ok_or_else(|| env_error("GOOGLE_CLIENT_SECRET"))?;

        let source_calendar_id = var("SOURCE_CALENDAR_ID").unwrap_or_else(|| "primary".to_string());
        let timezone = var("TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let gemini_api_key = var("GEMINI_API_KEY");
        let gemini_model = var("GEMINI_MODEL")
            .unwrap_or_else(|| crate::components::schedule::generator::DEFAULT_MODEL.to_string());
        let target_calendar_name =
            var("TARGET_CALENDAR_NAME").unwrap_or_else(|| DEFAULT_TARGET_CALENDAR.to_string());
        let token_file = var("TOKEN_FILE").unwrap_or_else(|| "token.json".to_string());

        // Parse numeric values
        let max_results = match var("MAX_RESULTS") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .map_err(|_| config_error(&format!("Invalid MAX_RESULTS value: {}", value)))?,
            None => DEFAULT_MAX_RESULTS,
        };

        let config = Config {
            google_client_id,
            google_client_secret,
            source_calendar_id,
            timezone,
            gemini_api_key,
            gemini_model,
            target_calendar_name,
            max_results,
            token_file,
            profile: PlannerProfile::default(),
        };

        // Fail early on an unknown timezone
        config.zone()?;

        Ok(config)
    }

    /// The configured timezone
    pub fn zone(&self) -> PlannerResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }

    /// The Gemini API key, required for schedule generation
    pub fn require_gemini_key(&self) -> PlannerResult<&str> {
        self.gemini_api_key
            .as_deref()
            .ok_or_else(|| env_error("GEMINI_API_KEY"))
    }
}

/// Read the planning profile, falling back to defaults when the file is absent
pub fn load_profile(path: &Path) -> PlannerResult<PlannerProfile> {
    if !path.exists() {
        return Ok(PlannerProfile::default());
    }

    let content = fs::read_to_string(path)?;
    let profile: PlannerProfile = toml::from_str(&content)?;
    if let Err(e) = profile.activities.validate() {
        warn!("Ignoring activities in {}: {}", path.display(), e);
        return Ok(PlannerProfile {
            activities: Default::default(),
            ..profile
        });
    }

    info!("Loaded planning profile from {}", path.display());
    Ok(profile)
}
