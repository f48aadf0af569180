use super::activities::Preference;
use super::models::{Event, EventType, PlanItem};
use crate::error::PlannerResult;
use crate::utils::time::{prompt_day, week_range};
use chrono::DateTime;
use chrono_tz::Tz;

const SYSTEM_PROMPT: &str = "You are a helpful AI schedule planner. \
Create a balanced weekly schedule for the user from wake-up to bedtime each day. \
Include: wake-up, morning routine, breakfast, focused study/work sessions, \
physical exercise, lunch, hobbies, relaxation, dinner, and evening wind-down. \
Integrate the user's existing calendar events and goals. \
Respect the user's energy preference (morning/night). \
Return ONLY a JSON array of events. \
Each event must have: summary, start (ISO string), end (ISO string), type (study | exercise | leisure | meeting | routine | meal). \
Do NOT include any extra text, explanations, or markdown. \
Output strictly as JSON.";

/// Everything one planning pass needs, fixed when the user asks for a plan
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    pub preference: Preference,
    pub activities: Vec<String>,
    pub notes: Vec<String>,
    pub existing_events: Vec<Event>,
}

impl PlanRequest {
    pub fn new(preference: Preference) -> Self {
        Self {
            preference,
            ..Default::default()
        }
    }

    pub fn with_activities(mut self, activities: Vec<String>) -> Self {
        self.activities = activities;
        self
    }

    pub fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_existing_events(mut self, events: Vec<Event>) -> Self {
        self.existing_events = events;
        self
    }
}

/// Existing events as the model sees them: every one is a fixed meeting
fn existing_as_meetings(events: &[Event]) -> Vec<PlanItem> {
    events
        .iter()
        .map(|event| PlanItem {
            summary: Some(event.summary().to_string()),
            start: Some(event.start_iso()),
            end: Some(event.end_iso()),
            kind: Some(Some(EventType::Meeting)),
            location: None,
        })
        .collect()
}

/// Compose the full planning prompt for the week starting at `now`
pub fn build_prompt(request: &PlanRequest, now: &DateTime<Tz>) -> PlannerResult<String> {
    let (week_start, week_end) = week_range(now);
    let existing = serde_json::to_string(&existing_as_meetings(&request.existing_events))?;

    let mut prompt = String::from(SYSTEM_PROMPT);
    prompt.push_str(&format!("\nUser preference: {}", request.preference));
    prompt.push_str(&format!(
        "\nUser activities: {}",
        serde_json::to_string(&request.activities)?
    ));
    prompt.push_str(&format!(
        "\nUser input: {}",
        serde_json::to_string(&request.notes)?
    ));
    prompt.push_str(&format!("\nExisting calendar events: {}", existing));
    prompt.push_str(&format!(
        "\nPlan strictly from {} to {}.",
        prompt_day(&week_start),
        prompt_day(&week_end)
    ));
    prompt.push_str("\nDo NOT schedule outside this range. Respond with valid JSON only.");

    Ok(prompt)
}
