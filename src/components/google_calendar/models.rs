use serde::{Deserialize, Serialize};

/// Start or end of an event: `dateTime` for timed events, `date` for all-day ones
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventDateTime {
    pub fn timed(date_time: String, time_zone: &str) -> Self {
        Self {
            date_time: Some(date_time),
            date: None,
            time_zone: Some(time_zone.to_string()),
        }
    }
}

/// Event resource as returned by the Calendar API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(default)]
    pub id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<EventDateTime>,
    pub end: Option<EventDateTime>,
    pub color_id: Option<String>,
}

/// One page of an events listing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsPage {
    #[serde(default)]
    pub items: Vec<RawEvent>,
    pub next_page_token: Option<String>,
}

/// Entry of the account's calendar list
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarListEntry {
    pub id: String,
    #[serde(default)]
    pub summary: String,
    pub time_zone: Option<String>,
}

/// One page of the calendar list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarListPage {
    #[serde(default)]
    pub items: Vec<CalendarListEntry>,
    pub next_page_token: Option<String>,
}

/// Body for creating a secondary calendar
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCalendar {
    pub summary: String,
    pub time_zone: String,
}

/// Body for inserting an event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub summary: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color_id: String,
}

/// Query parameters for an events listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventQuery {
    pub time_min: Option<String>,
    pub time_max: Option<String>,
    pub max_results: Option<u32>,
    pub single_events: bool,
    pub order_by_start_time: bool,
    pub page_token: Option<String>,
}

impl EventQuery {
    /// Continue a listing from a page token
    pub fn page(page_token: Option<String>) -> Self {
        Self {
            page_token,
            ..Default::default()
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(time_min) = &self.time_min {
            pairs.push(("timeMin", time_min.clone()));
        }
        if let Some(time_max) = &self.time_max {
            pairs.push(("timeMax", time_max.clone()));
        }
        if let Some(max_results) = self.max_results {
            pairs.push(("maxResults", max_results.to_string()));
        }
        if self.single_events {
            pairs.push(("singleEvents", "true".to_string()));
        }
        // The API only allows ordering by start time on expanded single events
        if self.order_by_start_time && self.single_events {
            pairs.push(("orderBy", "startTime".to_string()));
        }
        if let Some(page_token) = &self.page_token {
            pairs.push(("pageToken", page_token.clone()));
        }
        pairs
    }
}
