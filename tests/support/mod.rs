#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use weekplan::components::google_calendar::models::{
    CalendarListEntry, CalendarListPage, EventQuery, EventsPage, NewCalendar, NewEvent, RawEvent,
};
use weekplan::components::google_calendar::CalendarApi;
use weekplan::components::schedule::TextGenerator;
use weekplan::error::{generation_error, google_calendar_error, PlannerResult};

#[derive(Default)]
struct CalendarState {
    calendars: Vec<CalendarListEntry>,
    events: HashMap<String, Vec<RawEvent>>,
    queries: Vec<EventQuery>,
    calendar_pages: usize,
    next_id: usize,
    created_calendars: usize,
    deleted_events: usize,
}

/// In-memory calendar service with paginated event and calendar listings
pub struct MockCalendar {
    state: Mutex<CalendarState>,
    page_size: usize,
    fail_reads: bool,
    fail_inserts_after: Option<usize>,
}

impl MockCalendar {
    pub fn new(page_size: usize) -> Self {
        Self {
            state: Mutex::new(CalendarState::default()),
            page_size,
            fail_reads: false,
            fail_inserts_after: None,
        }
    }

    /// A service whose event listings always fail
    pub fn unreachable() -> Self {
        Self {
            fail_reads: true,
            ..Self::new(10)
        }
    }

    /// A service that rejects inserts once `count` events were inserted
    pub fn failing_inserts_after(count: usize) -> Self {
        Self {
            fail_inserts_after: Some(count),
            ..Self::new(10)
        }
    }

    pub fn add_calendar(&self, id: &str, summary: &str) {
        let mut state = self.state.lock().unwrap();
        state.calendars.push(CalendarListEntry {
            id: id.to_string(),
            summary: summary.to_string(),
            time_zone: None,
        });
    }

    pub fn add_event(&self, calendar_id: &str, mut event: RawEvent) {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        if event.id.is_empty() {
            event.id = format!("seed-{}", state.next_id);
        }
        state
            .events
            .entry(calendar_id.to_string())
            .or_default()
            .push(event);
    }

    pub fn calendars(&self) -> Vec<CalendarListEntry> {
        self.state.lock().unwrap().calendars.clone()
    }

    pub fn events(&self, calendar_id: &str) -> Vec<RawEvent> {
        self.state
            .lock()
            .unwrap()
            .events
            .get(calendar_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn queries(&self) -> Vec<EventQuery> {
        self.state.lock().unwrap().queries.clone()
    }

    /// Number of calendar list pages served so far
    pub fn calendar_pages(&self) -> usize {
        self.state.lock().unwrap().calendar_pages
    }

    pub fn created_calendars(&self) -> usize {
        self.state.lock().unwrap().created_calendars
    }

    pub fn deleted_events(&self) -> usize {
        self.state.lock().unwrap().deleted_events
    }

    fn inserted_events(state: &CalendarState) -> usize {
        state
            .events
            .values()
            .flatten()
            .filter(|event| event.id.starts_with("inserted-"))
            .count()
    }
}

#[async_trait]
impl CalendarApi for MockCalendar {
    async fn list_events(
        &self,
        calendar_id: &str,
        query: &EventQuery,
    ) -> PlannerResult<EventsPage> {
        if self.fail_reads {
            return Err(google_calendar_error("HTTP 503 - backend unavailable"));
        }

        let mut state = self.state.lock().unwrap();
        state.queries.push(query.clone());

        let events = state.events.get(calendar_id).cloned().unwrap_or_default();
        let offset = query
            .page_token
            .as_deref()
            .map(|token| token.parse::<usize>().unwrap())
            .unwrap_or(0);
        let limit = query
            .max_results
            .map(|max| max as usize)
            .unwrap_or(self.page_size)
            .min(self.page_size);

        let items: Vec<RawEvent> = events.iter().skip(offset).take(limit).cloned().collect();
        let next = offset + items.len();
        let next_page_token = if next < events.len() && query.max_results.is_none() {
            Some(next.to_string())
        } else {
            None
        };

        Ok(EventsPage {
            items,
            next_page_token,
        })
    }

    async fn list_calendar_page(
        &self,
        page_token: Option<&str>,
    ) -> PlannerResult<CalendarListPage> {
        let mut state = self.state.lock().unwrap();
        state.calendar_pages += 1;

        let offset = page_token
            .map(|token| token.parse::<usize>().unwrap())
            .unwrap_or(0);
        let items: Vec<CalendarListEntry> = state
            .calendars
            .iter()
            .skip(offset)
            .take(self.page_size)
            .cloned()
            .collect();
        let next = offset + items.len();
        let next_page_token = if next < state.calendars.len() {
            Some(next.to_string())
        } else {
            None
        };

        Ok(CalendarListPage {
            items,
            next_page_token,
        })
    }

    async fn create_calendar(&self, calendar: &NewCalendar) -> PlannerResult<CalendarListEntry> {
        let mut state = self.state.lock().unwrap();
        state.created_calendars += 1;
        let entry = CalendarListEntry {
            id: format!("calendar-{}", state.created_calendars),
            summary: calendar.summary.clone(),
            time_zone: Some(calendar.time_zone.clone()),
        };
        state.calendars.push(entry.clone());
        Ok(entry)
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> PlannerResult<()> {
        let mut state = self.state.lock().unwrap();
        let events = state
            .events
            .get_mut(calendar_id)
            .ok_or_else(|| google_calendar_error("HTTP 404 - calendar not found"))?;
        let before = events.len();
        events.retain(|event| event.id != event_id);
        if events.len() == before {
            return Err(google_calendar_error("HTTP 410 - event already deleted"));
        }
        state.deleted_events += 1;
        Ok(())
    }

    async fn insert_event(&self, calendar_id: &str, event: &NewEvent) -> PlannerResult<RawEvent> {
        let mut state = self.state.lock().unwrap();
        if let Some(limit) = self.fail_inserts_after {
            if Self::inserted_events(&state) >= limit {
                return Err(google_calendar_error("HTTP 403 - rate limit exceeded"));
            }
        }

        state.next_id += 1;
        let raw = RawEvent {
            id: format!("inserted-{}", state.next_id),
            summary: Some(event.summary.clone()),
            description: event.description.clone(),
            location: event.location.clone(),
            start: Some(event.start.clone()),
            end: Some(event.end.clone()),
            color_id: Some(event.color_id.clone()),
        };
        state
            .events
            .entry(calendar_id.to_string())
            .or_default()
            .push(raw.clone());
        Ok(raw)
    }
}

/// Text generator answering with a canned response
pub struct MockGenerator {
    response: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn replying(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A generator whose requests always fail
    pub fn failing() -> Self {
        Self {
            response: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn complete(&self, prompt: &str) -> PlannerResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.response
            .clone()
            .ok_or_else(|| generation_error("connection reset by peer"))
    }
}
