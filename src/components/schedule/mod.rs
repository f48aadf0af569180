pub mod activities;
pub mod constant;
pub mod generator;
pub mod models;
pub mod parser;
pub mod prompt;
pub mod storage;

pub use activities::{ActivityProfile, GamingFrequency, PlannerProfile, Preference};
pub use constant::ConstantActivity;
pub use generator::{generate_schedule, generate_schedule_at, GeminiGenerator, TextGenerator};
pub use models::{Event, EventType, PlanItem, DEFAULT_SUMMARY};
pub use parser::{extract_json_array, parse_plan};
pub use prompt::{build_prompt, PlanRequest};
pub use storage::{load_plan, save_plan};
