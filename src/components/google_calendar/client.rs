use super::api::CalendarApi;
use super::models::{
    CalendarListEntry, CalendarListPage, EventQuery, EventsPage, NewCalendar, NewEvent, RawEvent,
};
use super::token::TokenManager;
use crate::error::{google_calendar_error, PlannerResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Base URL of the Calendar v3 REST API
pub const API_BASE: &str = "https://www.googleapis.com/calendar/v3/";

/// Google Calendar over its REST API
#[derive(Clone)]
pub struct GoogleCalendarClient {
    token_manager: TokenManager,
    client: Client,
    base: Url,
}

impl GoogleCalendarClient {
    pub fn new(token_manager: TokenManager) -> PlannerResult<Self> {
        let base = Url::parse(API_BASE)
            .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;
        Ok(Self {
            token_manager,
            client: Client::new(),
            base,
        })
    }

    /// API URL from path segments; segments are percent-encoded
    fn url(&self, segments: &[&str]) -> PlannerResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| google_calendar_error("API base URL cannot have path segments"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send an authorized request and fail on a non-success status
    async fn send(&self, request: RequestBuilder, action: &str) -> PlannerResult<Response> {
        let access_token = self.token_manager.get_access_token().await?;

        let response = request
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to {}: {}", action, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to {}: HTTP {} - {}",
                action, status, error_body
            )));
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> PlannerResult<T> {
        let response = self.send(request, action).await?;
        response.json::<T>().await.map_err(|e| {
            google_calendar_error(&format!("Failed to parse response to {}: {}", action, e))
        })
    }
}

#[async_trait]
impl CalendarApi for GoogleCalendarClient {
    async fn list_events(
        &self,
        calendar_id: &str,
        query: &EventQuery,
    ) -> PlannerResult<EventsPage> {
        let mut url = self.url(&["calendars", calendar_id, "events"])?;
        for (key, value) in query.query_pairs() {
            url.query_pairs_mut().append_pair(key, &value);
        }

        debug!("Listing events on {}", calendar_id);
        self.send_json(self.client.get(url), "list events").await
    }

    async fn list_calendar_page(
        &self,
        page_token: Option<&str>,
    ) -> PlannerResult<CalendarListPage> {
        let mut url = self.url(&["users", "me", "calendarList"])?;
        if let Some(token) = page_token {
            url.query_pairs_mut().append_pair("pageToken", token);
        }

        debug!("Listing calendars");
        self.send_json(self.client.get(url), "list calendars").await
    }

    async fn create_calendar(&self, calendar: &NewCalendar) -> PlannerResult<CalendarListEntry> {
        let url = self.url(&["calendars"])?;
        self.send_json(self.client.post(url).json(calendar), "create calendar")
            .await
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> PlannerResult<()> {
        let url = self.url(&["calendars", calendar_id, "events", event_id])?;
        self.send(self.client.delete(url), "delete event").await?;
        Ok(())
    }

    async fn insert_event(&self, calendar_id: &str, event: &NewEvent) -> PlannerResult<RawEvent> {
        let url = self.url(&["calendars", calendar_id, "events"])?;
        self.send_json(self.client.post(url).json(event), "insert event")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn client() -> GoogleCalendarClient {
        let config = Config::from_lookup(|key| match key {
            "GOOGLE_CLIENT_ID" => Some("id".to_string()),
            "GOOGLE_CLIENT_SECRET" => Some("secret".to_string()),
            _ => None,
        })
        .unwrap();
        GoogleCalendarClient::new(TokenManager::new(&config)).unwrap()
    }

    #[test]
    fn test_url_encodes_calendar_ids() {
        let url = client()
            .url(&["calendars", "a#b@group.calendar.google.com", "events"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/calendar/v3/calendars/a%23b@group.calendar.google.com/events"
        );
    }

    #[test]
    fn test_url_keeps_slashes_inside_segments() {
        let url = client().url(&["calendars", "team/shared", "events", "x y"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/calendar/v3/calendars/team%2Fshared/events/x%20y"
        );
    }
}
