use super::api::CalendarApi;
use super::models::{EventDateTime, EventQuery, RawEvent};
use crate::components::schedule::{Event, DEFAULT_SUMMARY};
use crate::error::{parse_error, PlannerResult};
use crate::utils::time::{now_in, parse_date, parse_instant, week_range};
use chrono::DateTime;
use chrono_tz::Tz;
use tracing::{error, info, warn};

/// Read a start or end: the precise `dateTime` when present, otherwise the
/// all-day `date` anchored at local midnight
fn event_time(time: Option<&EventDateTime>, zone: Tz) -> PlannerResult<DateTime<Tz>> {
    let time = time.ok_or_else(|| parse_error("Missing event time"))?;
    if let Some(date_time) = &time.date_time {
        parse_instant(date_time, zone)
    } else if let Some(date) = &time.date {
        parse_date(date, zone)
    } else {
        Err(parse_error("Event time has neither dateTime nor date"))
    }
}

/// Convert an API event into an [`Event`] in `zone`
pub fn event_from_raw(raw: &RawEvent, zone: Tz) -> PlannerResult<Event> {
    let start = event_time(raw.start.as_ref(), zone)?;
    let end = event_time(raw.end.as_ref(), zone)?;
    let summary = raw.summary.as_deref().unwrap_or(DEFAULT_SUMMARY);

    Ok(Event::new(summary, start, end, zone).with_location(raw.location.clone()))
}

/// Fetch the coming week's events from a calendar.
///
/// Never fails: API errors are logged and yield an empty list.
pub async fn fetch_events<A>(api: &A, calendar_id: &str, max_results: u32, zone: Tz) -> Vec<Event>
where
    A: CalendarApi + ?Sized,
{
    fetch_events_at(api, calendar_id, max_results, &now_in(zone)).await
}

/// Fetch events for the week starting at `now`
pub async fn fetch_events_at<A>(
    api: &A,
    calendar_id: &str,
    max_results: u32,
    now: &DateTime<Tz>,
) -> Vec<Event>
where
    A: CalendarApi + ?Sized,
{
    let (week_start, week_end) = week_range(now);
    let query = EventQuery {
        time_min: Some(week_start.to_rfc3339()),
        time_max: Some(week_end.to_rfc3339()),
        max_results: Some(max_results),
        single_events: true,
        order_by_start_time: true,
        page_token: None,
    };

    let page = match api.list_events(calendar_id, &query).await {
        Ok(page) => page,
        Err(e) => {
            error!("Calendar API error: {}", e);
            return Vec::new();
        }
    };

    let zone = now.timezone();
    let events: Vec<Event> = page
        .items
        .iter()
        .filter_map(|raw| match event_from_raw(raw, zone) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!("Skipping calendar event {}: {}", raw.id, e);
                None
            }
        })
        .collect();

    info!("Fetched {} events from {}", events.len(), calendar_id);
    events
}
