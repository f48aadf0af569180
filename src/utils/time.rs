use crate::error::{parse_error, PlannerResult};
use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;

/// Formats accepted for timestamps that carry no UTC offset
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Current instant in the given zone
pub fn now_in(zone: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&zone)
}

/// Formats accepted for timestamps with a UTC offset, with or without a colon
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];

/// The planning window: from `now` up to the same wall-clock time six days later
pub fn week_range(now: &DateTime<Tz>) -> (DateTime<Tz>, DateTime<Tz>) {
    (now.clone(), add_local_days(now, 6))
}

/// Move `days` calendar days ahead, keeping the local wall-clock time.
///
/// A wall time that falls into a DST gap is moved by elapsed time instead.
pub fn add_local_days(dt: &DateTime<Tz>, days: u64) -> DateTime<Tz> {
    let zone = dt.timezone();
    dt.naive_local()
        .checked_add_days(Days::new(days))
        .and_then(|naive| localize(&naive, zone).ok())
        .unwrap_or_else(|| dt.clone() + Duration::days(days as i64))
}

/// Day label used in the planning prompt, e.g. "Monday, January 01, 2024"
pub fn prompt_day(dt: &DateTime<Tz>) -> String {
    dt.format("%A, %B %d, %Y").to_string()
}

/// Attach a zone to a wall-clock time.
///
/// Ambiguous times (DST fold) resolve to the earlier instant; times that do
/// not exist in the zone (DST gap) are an error.
pub fn localize(naive: &NaiveDateTime, zone: Tz) -> PlannerResult<DateTime<Tz>> {
    match zone.from_local_datetime(naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(parse_error(&format!(
            "Local time {} does not exist in {}",
            naive, zone
        ))),
    }
}

/// Midnight of an all-day date in the given zone
pub fn parse_date(value: &str, zone: Tz) -> PlannerResult<DateTime<Tz>> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| parse_error(&format!("Failed to parse date '{}': {}", value, e)))?;
    start_of_day(date, zone)
}

/// First instant of `date` in the given zone
pub fn start_of_day(date: NaiveDate, zone: Tz) -> PlannerResult<DateTime<Tz>> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| parse_error("Failed to create datetime"))?;
    match localize(&midnight, zone) {
        Ok(dt) => Ok(dt),
        // Zones that switch DST at midnight skip 00:00, fall forward one hour
        Err(_) => localize(&(midnight + Duration::hours(1)), zone),
    }
}

/// Parse an ISO-8601 timestamp into the given zone.
///
/// Timestamps with an offset are converted; timestamps without one are read
/// as wall-clock time in `zone`; bare dates become local midnight.
pub fn parse_instant(value: &str, zone: Tz) -> PlannerResult<DateTime<Tz>> {
    let value = value.trim();
    if value.is_empty() {
        return Err(parse_error("Empty timestamp"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&zone));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Ok(dt.with_timezone(&zone));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return localize(&naive, zone);
        }
    }

    if value.len() == 10 {
        return parse_date(value, zone);
    }

    Err(parse_error(&format!("Failed to parse timestamp '{}'", value)))
}

/// Parse time string in HH:MM format
pub fn parse_time(time_str: &str) -> Option<NaiveTime> {
    let (hour, minute) = time_str.trim().split_once(':')?;
    let hour = hour.parse::<u32>().ok()?;
    let minute = minute.parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Next date falling on `weekday`, counting `today` itself
pub fn next_weekday(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let days_ahead = (7 + weekday.num_days_from_monday() as i64
        - today.weekday().num_days_from_monday() as i64)
        % 7;
    today + Duration::days(days_ahead)
}
