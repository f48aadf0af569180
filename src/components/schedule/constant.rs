use super::models::{Event, EventType};
use crate::error::{config_error, PlannerResult};
use crate::utils::time::{localize, next_weekday};
use chrono::{DateTime, NaiveTime, Weekday};
use chrono_tz::Tz;

/// A fixed weekly commitment entered by hand, e.g. piano practice on Tuesdays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantActivity {
    pub name: String,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: Option<String>,
}

impl ConstantActivity {
    pub fn validate(&self) -> PlannerResult<()> {
        if self.name.trim().is_empty() {
            return Err(config_error("Activity name must not be empty"));
        }
        if self.start_time >= self.end_time {
            return Err(config_error(&format!(
                "Activity must end after it starts ({} - {})",
                self.start_time.format("%H:%M"),
                self.end_time.format("%H:%M")
            )));
        }
        Ok(())
    }

    /// The next occurrence, counting today, as a `constant` event
    pub fn next_occurrence(&self, now: &DateTime<Tz>) -> PlannerResult<Event> {
        self.validate()?;

        let zone = now.timezone();
        let date = next_weekday(now.date_naive(), self.weekday);
        let start = localize(&date.and_time(self.start_time), zone)?;
        let end = localize(&date.and_time(self.end_time), zone)?;

        Ok(Event::new(self.name.trim(), start, end, zone)
            .with_location(self.location.clone())
            .with_kind(Some(EventType::Constant)))
    }
}
