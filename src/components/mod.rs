// Export components
pub mod google_calendar;
pub mod schedule;

// Re-export the pipeline entry points
pub use google_calendar::{fetch_events, push_events, CalendarApi, GoogleCalendarClient, WriteTarget};
pub use schedule::{generate_schedule, Event, EventType, GeminiGenerator, PlanRequest, TextGenerator};
