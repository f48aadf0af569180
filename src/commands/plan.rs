use super::calendar::format_week;
use super::{CommandContext, CommandResult};
use crate::cli::{ConstantArgs, PlanArgs};
use std::path::Path;
use tracing::{info, warn};
use weekplan::components::google_calendar::{fetch_events, push_events};
use weekplan::components::schedule::activities::note_lines;
use weekplan::components::schedule::{
    generate_schedule, load_plan, save_plan, ActivityProfile, ConstantActivity, PlanRequest,
    PlannerProfile,
};
use weekplan::error::PlannerResult;
use weekplan::utils::time::now_in;

/// Combine the stored profile with command-line selections
fn build_request(profile: &PlannerProfile, args: &PlanArgs) -> PlannerResult<PlanRequest> {
    let activities = ActivityProfile {
        exercise_per_week: args.exercise.or(profile.activities.exercise_per_week),
        social: args.social || profile.activities.social,
        gaming: args.gaming.or(profile.activities.gaming),
        study: args.study || profile.activities.study,
    };
    activities.validate()?;

    let notes = profile
        .notes
        .iter()
        .chain(args.notes.iter())
        .flat_map(|note| note_lines(note))
        .collect();

    Ok(PlanRequest::new(args.preference.unwrap_or(profile.preference))
        .with_activities(activities.descriptions())
        .with_notes(notes))
}

/// Fetch the week, generate a plan and optionally save or push it
pub async fn plan(ctx: &CommandContext, args: PlanArgs) -> CommandResult {
    let api = ctx.calendar_api()?;
    let generator = ctx.generator()?;
    let request = build_request(&ctx.config.profile, &args)?;

    let existing = fetch_events(
        &api,
        &ctx.config.source_calendar_id,
        ctx.config.max_results,
        ctx.zone,
    )
    .await;
    info!(
        "Planning around {} existing events with {}",
        existing.len(),
        generator.model()
    );

    let request = request.with_existing_events(existing);
    let plan = generate_schedule(&generator, &request, ctx.zone).await;

    if plan.is_empty() {
        println!("❌ No schedule could be generated. Check the logs for details.");
        return Ok(());
    }

    println!("🤖 AI-planned weekly schedule:");
    print!("{}", format_week(&plan, &now_in(ctx.zone)));

    if let Some(path) = &args.save {
        save_plan(path, &plan)?;
        println!("💾 Saved plan to {}", path.display());
    }

    if args.push {
        let pushed = push_events(&api, &ctx.write_target(), &plan).await?;
        println!(
            "✅ Pushed {} events to '{}'",
            pushed, ctx.config.target_calendar_name
        );
    }

    Ok(())
}

/// Push a previously saved plan
pub async fn push_saved(ctx: &CommandContext, path: &Path) -> CommandResult {
    let plan = load_plan(path, ctx.zone)?;
    let api = ctx.calendar_api()?;

    let pushed = push_events(&api, &ctx.write_target(), &plan).await?;
    println!(
        "✅ Pushed {} events to '{}'",
        pushed, ctx.config.target_calendar_name
    );
    Ok(())
}

/// Put a constant weekly activity on the target calendar
pub async fn add_constant(ctx: &CommandContext, args: ConstantArgs) -> CommandResult {
    let activity = ConstantActivity {
        name: args.name,
        weekday: args.day,
        start_time: args.start,
        end_time: args.end,
        location: args.location,
    };
    let event = activity.next_occurrence(&now_in(ctx.zone))?;

    // push_events replaces the whole calendar, so this drops any pushed plan
    warn!(
        "Adding '{}' replaces the current contents of '{}'",
        event.summary(),
        ctx.config.target_calendar_name
    );

    let api = ctx.calendar_api()?;
    push_events(&api, &ctx.write_target(), std::slice::from_ref(&event)).await?;

    println!(
        "✅ Added {} on {} to your calendar!",
        event.summary(),
        event.start().format("%A %d.%m. %H:%M")
    );
    Ok(())
}
