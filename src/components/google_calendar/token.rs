use crate::config::Config;
use crate::error::{google_calendar_error, PlannerResult};
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Google's OAuth token endpoint
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Read and write access to calendars
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Tokens expiring within this many seconds are refreshed first
const EXPIRY_MARGIN_SECS: i64 = 60;

/// OAuth token as kept in the token file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: i64,
}

impl StoredToken {
    /// Build from a token endpoint response, keeping the previous refresh
    /// token when the response carries none
    pub fn from_response(response: TokenResponse, previous_refresh: Option<String>) -> Self {
        let expires_in = response.expires_in.unwrap_or(3600);
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token.or(previous_refresh),
            expires_at: Utc::now().timestamp() + expires_in,
        }
    }

    pub fn is_valid_at(&self, timestamp: i64) -> bool {
        self.expires_at - EXPIRY_MARGIN_SECS > timestamp
    }
}

/// Body returned by the token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
}

/// Hands out valid access tokens, refreshing them when they expire
#[derive(Clone)]
pub struct TokenManager {
    token_file: PathBuf,
    client_id: String,
    client_secret: String,
    client: Client,
    cached: Arc<Mutex<Option<StoredToken>>>,
}

impl TokenManager {
    pub fn new(config: &Config) -> Self {
        Self {
            token_file: PathBuf::from(&config.token_file),
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            client: Client::new(),
            cached: Arc::new(Mutex::new(None)),
        }
    }

    /// Get a valid access token, refreshing the stored one if needed
    pub async fn get_access_token(&self) -> PlannerResult<String> {
        let mut cached = self.cached.lock().await;

        let token = match cached.take() {
            Some(token) => token,
            None => self.load()?,
        };

        let token = if token.is_valid_at(Utc::now().timestamp()) {
            token
        } else {
            debug!("Access token expired, refreshing");
            let refreshed = self.refresh_token(&token).await?;
            self.save(&refreshed)?;
            refreshed
        };

        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }

    /// Refresh an expired token
    async fn refresh_token(&self, token: &StoredToken) -> PlannerResult<StoredToken> {
        let refresh_token = token.refresh_token.as_deref().ok_or_else(|| {
            google_calendar_error("No refresh token stored. Run get_calendar_token again.")
        })?;

        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .client
            .post(TOKEN_URL)
            .form(&params)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to refresh token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to refresh token: HTTP {} - {}",
                status, error_body
            )));
        }

        let new_token: TokenResponse = response.json().await.map_err(|e| {
            google_calendar_error(&format!("Failed to parse token response: {}", e))
        })?;

        info!("Refreshed Google access token");
        Ok(StoredToken::from_response(
            new_token,
            Some(refresh_token.to_string()),
        ))
    }

    /// Store a token obtained elsewhere, e.g. by the authorization flow
    pub async fn set_token(&self, token: StoredToken) -> PlannerResult<()> {
        self.save(&token)?;
        *self.cached.lock().await = Some(token);
        Ok(())
    }

    fn load(&self) -> PlannerResult<StoredToken> {
        let content = fs::read_to_string(&self.token_file).map_err(|e| {
            google_calendar_error(&format!(
                "No token found in {} ({}). Run get_calendar_token first.",
                self.token_file.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, token: &StoredToken) -> PlannerResult<()> {
        let json = serde_json::to_string_pretty(token)?;
        fs::write(&self.token_file, json)?;
        Ok(())
    }
}
