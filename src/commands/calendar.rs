use super::{CommandContext, CommandResult};
use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use weekplan::components::google_calendar::fetch_events;
use weekplan::components::schedule::Event;
use weekplan::utils::time::now_in;

/// Show the coming week of a calendar
pub async fn fetch(
    ctx: &CommandContext,
    calendar: Option<String>,
    max_results: Option<u32>,
) -> CommandResult {
    let api = ctx.calendar_api()?;
    let calendar_id = calendar.unwrap_or_else(|| ctx.config.source_calendar_id.clone());
    let max_results = max_results.unwrap_or(ctx.config.max_results);

    let events = fetch_events(&api, &calendar_id, max_results, ctx.zone).await;
    if events.is_empty() {
        println!("No events found in your Google Calendar.");
    } else {
        println!("📅 Upcoming week:");
        print!("{}", format_week(&events, &now_in(ctx.zone)));
    }

    Ok(())
}

fn event_line(event: &Event) -> String {
    let mut line = format!(
        "• {} ({}–{})",
        event.summary(),
        event.start().format("%H:%M"),
        event.end().format("%H:%M")
    );
    if let Some(kind) = event.kind() {
        line.push_str(&format!(" [{}]", kind));
    }
    line.push('\n');
    line
}

/// Events of the week starting at `now`, grouped per day
pub fn format_week(events: &[Event], now: &DateTime<Tz>) -> String {
    let today = now.date_naive();
    let week_end = today + Duration::days(7);

    let mut message = String::new();
    let mut current_date = today;

    while current_date < week_end {
        let day_events: Vec<_> = events
            .iter()
            .filter(|event| event.start().date_naive() == current_date)
            .collect();

        if !day_events.is_empty() {
            message.push_str(&format!("\n{}:\n", current_date.format("%A %d.%m.")));
            for event in day_events {
                message.push_str(&event_line(event));
            }
        }

        current_date += Duration::days(1);
    }

    message
}
