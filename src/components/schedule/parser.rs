use super::models::{Event, EventType, PlanItem, DEFAULT_SUMMARY};
use crate::error::{parse_error, PlannerResult};
use crate::utils::time::parse_instant;
use chrono_tz::Tz;
use serde_json::Value;
use tracing::{debug, warn};

/// Locate the JSON array in a model response.
///
/// Models wrap their answer in prose or code fences, so this takes everything
/// from the first `[` to the last `]`.
pub fn extract_json_array(response: &str) -> Option<&str> {
    let json_start = response.find('[')?;
    let json_end = response.rfind(']')?;
    if json_start < json_end {
        Some(&response[json_start..=json_end])
    } else {
        None
    }
}

/// Build an event from one plan element; `start` and `end` are required.
///
/// A missing `type` becomes `general`, an explicit `null` leaves it unset.
pub fn event_from_item(item: PlanItem, zone: Tz) -> PlannerResult<Event> {
    let start = item
        .start
        .as_deref()
        .ok_or_else(|| parse_error("Missing start"))?;
    let end = item
        .end
        .as_deref()
        .ok_or_else(|| parse_error("Missing end"))?;

    let start = parse_instant(start, zone)?;
    let end = parse_instant(end, zone)?;
    let summary = item.summary.unwrap_or_else(|| DEFAULT_SUMMARY.to_string());
    let kind = item.kind.unwrap_or(Some(EventType::General));

    Ok(Event::new(summary, start, end, zone)
        .with_location(item.location)
        .with_kind(kind))
}

/// Parse a plan out of free-form text.
///
/// Fails only when no JSON array can be found; elements that do not form a
/// valid event are logged and skipped.
pub fn parse_plan(response: &str, zone: Tz) -> PlannerResult<Vec<Event>> {
    let json_str = extract_json_array(response)
        .ok_or_else(|| parse_error("No JSON array found in response"))?;

    let elements: Vec<Value> = serde_json::from_str(json_str)
        .map_err(|e| parse_error(&format!("Failed to parse JSON array: {}", e)))?;

    let total = elements.len();
    let mut events = Vec::with_capacity(total);
    for element in elements {
        let converted = serde_json::from_value::<PlanItem>(element.clone())
            .map_err(|e| parse_error(&e.to_string()))
            .and_then(|item| event_from_item(item, zone));

        match converted {
            Ok(event) => events.push(event),
            Err(e) => warn!("Skipping invalid event {}: {}", element, e),
        }
    }

    debug!("Parsed {} of {} plan elements", events.len(), total);
    Ok(events)
}
