use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Title used when the source omits one
pub const DEFAULT_SUMMARY: &str = "No title";

/// Classification tag of an event.
///
/// The known tags are closed; anything else is carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Study,
    Exercise,
    Leisure,
    Meeting,
    Routine,
    Meal,
    Constant,
    General,
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Study => "study",
            EventType::Exercise => "exercise",
            EventType::Leisure => "leisure",
            EventType::Meeting => "meeting",
            EventType::Routine => "routine",
            EventType::Meal => "meal",
            EventType::Constant => "constant",
            EventType::General => "general",
            EventType::Other(tag) => tag,
        }
    }
}

impl From<&str> for EventType {
    fn from(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "study" => EventType::Study,
            "exercise" => EventType::Exercise,
            "leisure" => EventType::Leisure,
            "meeting" => EventType::Meeting,
            "routine" => EventType::Routine,
            "meal" => EventType::Meal,
            "constant" => EventType::Constant,
            "general" => EventType::General,
            _ => EventType::Other(tag.to_string()),
        }
    }
}

impl From<String> for EventType {
    fn from(tag: String) -> Self {
        EventType::from(tag.as_str())
    }
}

impl From<EventType> for String {
    fn from(kind: EventType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar event, fetched or planned.
///
/// Times are normalized into the planner's zone when the event is built and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    summary: String,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    location: Option<String>,
    kind: Option<EventType>,
}

impl Event {
    /// Create an event, re-expressing `start` and `end` in `zone`
    pub fn new(
        summary: impl Into<String>,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
        zone: Tz,
    ) -> Self {
        let summary = summary.into();
        let summary = if summary.trim().is_empty() {
            DEFAULT_SUMMARY.to_string()
        } else {
            summary
        };

        Self {
            summary,
            start: start.with_timezone(&zone),
            end: end.with_timezone(&zone),
            location: None,
            kind: None,
        }
    }

    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location.filter(|l| !l.trim().is_empty());
        self
    }

    pub fn with_kind(mut self, kind: Option<EventType>) -> Self {
        self.kind = kind;
        self
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    pub fn end(&self) -> &DateTime<Tz> {
        &self.end
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn kind(&self) -> Option<&EventType> {
        self.kind.as_ref()
    }

    /// The zone all of this event's times are expressed in
    pub fn zone(&self) -> Tz {
        self.start.timezone()
    }

    /// Start as an ISO-8601 string with offset
    pub fn start_iso(&self) -> String {
        self.start.to_rfc3339()
    }

    /// End as an ISO-8601 string with offset
    pub fn end_iso(&self) -> String {
        self.end.to_rfc3339()
    }

    /// The JSON shape the planner exchanges with the model and with saved plans
    pub fn to_plan_item(&self) -> PlanItem {
        PlanItem {
            summary: Some(self.summary.clone()),
            start: Some(self.start_iso()),
            end: Some(self.end_iso()),
            kind: Some(self.kind.clone()),
            location: self.location.clone(),
        }
    }
}

/// One element of a plan as JSON.
///
/// `kind` tells a missing `type` (`None`) apart from an explicit `null`
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    pub summary: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<Option<EventType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
