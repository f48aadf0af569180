use super::api::CalendarApi;
use super::models::{EventDateTime, EventQuery, NewCalendar, NewEvent};
use crate::components::schedule::{Event, EventType};
use crate::error::PlannerResult;
use chrono_tz::Tz;
use tracing::{debug, info};

/// Color for events without a known type (gray)
pub const DEFAULT_COLOR_ID: &str = "1";

/// Google Calendar color id for an event type
pub fn color_id(kind: Option<&EventType>) -> &'static str {
    match kind {
        Some(EventType::Study) => "2",     // blue
        Some(EventType::Exercise) => "6",  // green
        Some(EventType::Leisure) => "7",   // purple
        Some(EventType::Meeting) => "9",   // yellow
        Some(EventType::Routine) => "10",  // orange
        Some(EventType::Meal) => "5",      // pink
        _ => DEFAULT_COLOR_ID,
    }
}

/// Where pushed plans go: a calendar found or created by display name
#[derive(Debug, Clone, PartialEq)]
pub struct WriteTarget {
    pub calendar_name: String,
    pub zone: Tz,
}

impl WriteTarget {
    pub fn new(calendar_name: impl Into<String>, zone: Tz) -> Self {
        Self {
            calendar_name: calendar_name.into(),
            zone,
        }
    }
}

/// Insert body for one planned event
pub fn new_event(event: &Event, zone: Tz) -> NewEvent {
    let time_zone = zone.name();
    NewEvent {
        summary: event.summary().to_string(),
        start: EventDateTime::timed(event.start_iso(), time_zone),
        end: EventDateTime::timed(event.end_iso(), time_zone),
        location: event.location().map(str::to_string),
        description: event.kind().map(|kind| format!("Type: {}", kind)),
        color_id: color_id(event.kind()).to_string(),
    }
}

/// Id of the calendar named in `target`, creating it when missing
pub async fn get_or_create_calendar<A>(api: &A, target: &WriteTarget) -> PlannerResult<String>
where
    A: CalendarApi + ?Sized,
{
    let calendars = api.list_calendars().await?;
    if let Some(existing) = calendars
        .into_iter()
        .find(|calendar| calendar.summary == target.calendar_name)
    {
        debug!("Using existing calendar '{}'", target.calendar_name);
        return Ok(existing.id);
    }

    let created = api
        .create_calendar(&NewCalendar {
            summary: target.calendar_name.clone(),
            time_zone: target.zone.name().to_string(),
        })
        .await?;
    info!("Created new calendar '{}'", target.calendar_name);
    Ok(created.id)
}

/// Delete every event on a calendar, returning how many were removed.
///
/// All pages are listed before anything is deleted so that deletions cannot
/// shift later pages.
pub async fn clear_calendar<A>(api: &A, calendar_id: &str) -> PlannerResult<usize>
where
    A: CalendarApi + ?Sized,
{
    let mut event_ids = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = api
            .list_events(calendar_id, &EventQuery::page(page_token.take()))
            .await?;
        event_ids.extend(page.items.into_iter().map(|event| event.id));

        page_token = page.next_page_token;
        if page_token.is_none() {
            break;
        }
    }

    for event_id in &event_ids {
        api.delete_event(calendar_id, event_id).await?;
    }

    info!("Cleared {} events from {}", event_ids.len(), calendar_id);
    Ok(event_ids.len())
}

/// Replace the target calendar's contents with `events`.
///
/// Errors are returned as-is; a failure halfway leaves the calendar partially
/// cleared or partially filled.
pub async fn push_events<A>(api: &A, target: &WriteTarget, events: &[Event]) -> PlannerResult<usize>
where
    A: CalendarApi + ?Sized,
{
    let calendar_id = get_or_create_calendar(api, target).await?;
    clear_calendar(api, &calendar_id).await?;

    let mut inserted = 0;
    for event in events {
        api.insert_event(&calendar_id, &new_event(event, target.zone))
            .await?;
        inserted += 1;
    }

    info!(
        "Pushed {} events to '{}'",
        inserted, target.calendar_name
    );
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Stockholm;

    #[test]
    fn test_color_table() {
        assert_eq!(color_id(Some(&EventType::Study)), "2");
        assert_eq!(color_id(Some(&EventType::Exercise)), "6");
        assert_eq!(color_id(Some(&EventType::Leisure)), "7");
        assert_eq!(color_id(Some(&EventType::Meeting)), "9");
        assert_eq!(color_id(Some(&EventType::Routine)), "10");
        assert_eq!(color_id(Some(&EventType::Meal)), "5");
    }

    #[test]
    fn test_unlisted_types_use_default_color() {
        assert_eq!(color_id(None), DEFAULT_COLOR_ID);
        assert_eq!(color_id(Some(&EventType::Constant)), DEFAULT_COLOR_ID);
        assert_eq!(color_id(Some(&EventType::General)), DEFAULT_COLOR_ID);
        assert_eq!(
            color_id(Some(&EventType::from("unknown_tag"))),
            DEFAULT_COLOR_ID
        );
    }

    #[test]
    fn test_new_event_body() {
        let start = Stockholm.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap();
        let end = Stockholm.with_ymd_and_hms(2024, 1, 1, 7, 30, 0).unwrap();
        let event = Event::new("Breakfast", start, end, Stockholm)
            .with_kind(Some(EventType::Meal))
            .with_location(Some("Kitchen".to_string()));

        let body = new_event(&event, Stockholm);
        assert_eq!(body.summary, "Breakfast");
        assert_eq!(
            body.start,
            EventDateTime::timed("2024-01-01T07:00:00+01:00".to_string(), "Europe/Stockholm")
        );
        assert_eq!(body.end.date_time.as_deref(), Some("2024-01-01T07:30:00+01:00"));
        assert_eq!(body.location.as_deref(), Some("Kitchen"));
        assert_eq!(body.description.as_deref(), Some("Type: meal"));
        assert_eq!(body.color_id, "5");
    }

    #[test]
    fn test_new_event_without_type() {
        let start = Stockholm.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap();
        let event = Event::new("Dentist", start, start, Stockholm);

        let body = new_event(&event, Stockholm);
        assert_eq!(body.description, None);
        assert_eq!(body.location, None);
        assert_eq!(body.color_id, DEFAULT_COLOR_ID);
    }
}
