use super::models::{
    CalendarListEntry, CalendarListPage, EventQuery, EventsPage, NewCalendar, NewEvent, RawEvent,
};
use crate::error::PlannerResult;
use async_trait::async_trait;

/// Operations the planner needs from a calendar service
#[async_trait]
pub trait CalendarApi: Send + Sync {
    /// One page of events on a calendar
    async fn list_events(&self, calendar_id: &str, query: &EventQuery)
        -> PlannerResult<EventsPage>;

    /// One page of the account's calendar list
    async fn list_calendar_page(&self, page_token: Option<&str>)
        -> PlannerResult<CalendarListPage>;

    /// Every calendar visible to the account, following `nextPageToken`
    async fn list_calendars(&self) -> PlannerResult<Vec<CalendarListEntry>> {
        let mut calendars = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.list_calendar_page(page_token.as_deref()).await?;
            calendars.extend(page.items);

            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        Ok(calendars)
    }

    async fn create_calendar(&self, calendar: &NewCalendar) -> PlannerResult<CalendarListEntry>;

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> PlannerResult<()>;

    async fn insert_event(&self, calendar_id: &str, event: &NewEvent) -> PlannerResult<RawEvent>;
}
