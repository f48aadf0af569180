mod support;

use chrono::TimeZone;
use chrono_tz::Europe::Stockholm;
use support::MockGenerator;
use weekplan::components::schedule::{
    generate_schedule_at, Event, EventType, PlanRequest, Preference,
};

fn request() -> PlanRequest {
    PlanRequest::new(Preference::Morning)
        .with_activities(vec!["I want to exercise 3 times a week.".to_string()])
        .with_notes(vec!["Finish the report".to_string()])
}

/// Prose and code fences around the array are ignored
#[tokio::test]
async fn test_plan_inside_prose() {
    let generator = MockGenerator::replying(
        "Sure! ```json\n[{\"summary\":\"Gym\",\"start\":\"2024-01-01T08:00:00\",\"end\":\"2024-01-01T09:00:00\",\"type\":\"exercise\"}]\n```",
    );
    let now = Stockholm.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();

    let plan = generate_schedule_at(&generator, &request(), &now).await;

    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].summary(), "Gym");
    assert_eq!(plan[0].kind(), Some(&EventType::Exercise));
    assert_eq!(plan[0].start_iso(), "2024-01-01T08:00:00+01:00");
    assert_eq!(plan[0].end_iso(), "2024-01-01T09:00:00+01:00");
}

/// A response without an array gives an empty plan
#[tokio::test]
async fn test_response_without_array() {
    let generator = MockGenerator::replying("I'm sorry, I can't plan your week right now.");
    let now = Stockholm.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();

    let plan = generate_schedule_at(&generator, &request(), &now).await;
    assert!(plan.is_empty());
}

/// A bracketed span that is not JSON gives an empty plan
#[tokio::test]
async fn test_response_with_broken_json() {
    let generator = MockGenerator::replying("[{\"summary\": \"Gym\", ]");
    let now = Stockholm.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();

    let plan = generate_schedule_at(&generator, &request(), &now).await;
    assert!(plan.is_empty());
}

/// The element without a start is skipped, the others survive in order
#[tokio::test]
async fn test_invalid_element_is_skipped() {
    let generator = MockGenerator::replying(
        r#"[
            {"summary":"Breakfast","start":"2024-01-01T07:00:00","end":"2024-01-01T07:30:00","type":"meal"},
            {"summary":"Mystery","end":"2024-01-01T09:00:00","type":"leisure"},
            {"summary":"Deep work","start":"2024-01-01T09:00:00","end":"2024-01-01T11:00:00","type":"study"}
        ]"#,
    );
    let now = Stockholm.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();

    let plan = generate_schedule_at(&generator, &request(), &now).await;

    let summaries: Vec<&str> = plan.iter().map(Event::summary).collect();
    assert_eq!(summaries, vec!["Breakfast", "Deep work"]);
}

/// A failing generation call gives an empty plan
#[tokio::test]
async fn test_generation_failure_fails_soft() {
    let generator = MockGenerator::failing();
    let now = Stockholm.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();

    let plan = generate_schedule_at(&generator, &request(), &now).await;
    assert!(plan.is_empty());
    assert_eq!(generator.prompts().len(), 1);
}

/// Existing events and the date window reach the prompt
#[tokio::test]
async fn test_prompt_carries_request() {
    let generator = MockGenerator::replying("[]");
    let now = Stockholm.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();
    let start = Stockholm.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
    let end = Stockholm.with_ymd_and_hms(2024, 1, 2, 11, 0, 0).unwrap();
    let request = request().with_existing_events(vec![Event::new("Dentist", start, end, Stockholm)]);

    let plan = generate_schedule_at(&generator, &request, &now).await;
    assert!(plan.is_empty());

    let prompts = generator.prompts();
    let prompt = &prompts[0];
    assert!(prompt.contains("User preference: morning"));
    assert!(prompt.contains("I want to exercise 3 times a week."));
    assert!(prompt.contains("Finish the report"));
    assert!(prompt.contains(r#""summary":"Dentist","start":"2024-01-02T10:00:00+01:00","end":"2024-01-02T11:00:00+01:00","type":"meeting""#));
    assert!(prompt.contains("Plan strictly from Monday, January 01, 2024 to Sunday, January 07, 2024."));
}
