pub mod api;
pub mod client;
pub mod models;
pub mod reader;
pub mod token;
pub mod writer;

pub use api::CalendarApi;
pub use client::GoogleCalendarClient;
pub use reader::{event_from_raw, fetch_events, fetch_events_at};
pub use token::TokenManager;
pub use writer::{
    clear_calendar, color_id, get_or_create_calendar, push_events, WriteTarget, DEFAULT_COLOR_ID,
};
