use super::models::{Event, PlanItem};
use super::parser::parse_plan;
use crate::error::PlannerResult;
use chrono_tz::Tz;
use std::fs;
use std::path::Path;
use tracing::info;

/// Write a plan as a JSON array of plan items
pub fn save_plan(path: &Path, events: &[Event]) -> PlannerResult<()> {
    let items: Vec<PlanItem> = events.iter().map(Event::to_plan_item).collect();
    fs::write(path, serde_json::to_string_pretty(&items)?)?;
    info!("Saved {} planned events to {}", events.len(), path.display());
    Ok(())
}

/// Read a saved plan; invalid entries are skipped the same way model output is
pub fn load_plan(path: &Path, zone: Tz) -> PlannerResult<Vec<Event>> {
    let content = fs::read_to_string(path)?;
    parse_plan(&content, zone)
}
