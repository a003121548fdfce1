use anyhow::Result;
use clap::Args;
use daybook_core::validate::validate_event;
use daybook_core::{DaybookError, EventId, EventPatch};
use owo_colors::OwoColorize;

use super::{App, resolve_label};
use crate::utils::input::{normalize_time, parse_date, resolve_target};

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// Day the event is on
    pub date: String,

    /// Position in the day's list (0-based) or id prefix
    pub target: String,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New start time
    #[arg(short, long, conflicts_with = "all_day")]
    pub start: Option<String>,

    /// New end time ("" clears it)
    #[arg(short, long, conflicts_with = "all_day")]
    pub end: Option<String>,

    /// Make the event all-day (clears start and end)
    #[arg(long)]
    pub all_day: bool,

    /// New location ("" clears it)
    #[arg(short, long)]
    pub location: Option<String>,

    /// New description ("" clears it)
    #[arg(long)]
    pub description: Option<String>,

    /// New label from the palette ("" clears it)
    #[arg(long)]
    pub label: Option<String>,

    /// Move the event to another day
    #[arg(long)]
    pub move_to: Option<String>,
}

/// `None` leaves a field alone; an empty string clears it.
fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| if v.trim().is_empty() { None } else { Some(v) })
}

fn build_patch(args: EditArgs) -> Result<EventPatch> {
    let mut patch = EventPatch {
        title: args.title,
        location: clearable(args.location),
        description: clearable(args.description),
        ..Default::default()
    };

    if args.all_day {
        patch.time = Some(None);
        patch.end_time = Some(None);
    }
    if let Some(start) = args.start {
        patch.time = Some(Some(normalize_time(&start)?));
    }
    if let Some(end) = clearable(args.end) {
        patch.end_time = Some(end.map(|e| normalize_time(&e)).transpose()?);
    }
    if let Some(label) = args.label {
        patch.label = Some(resolve_label(&label)?);
    }
    if let Some(date) = args.move_to {
        patch.date = Some(parse_date(&date)?);
    }

    Ok(patch)
}

pub fn run(app: &mut App, args: EditArgs) -> Result<EventId> {
    let date = parse_date(&args.date)?;
    let id = resolve_target(&app.store, date, &args.target)?;
    let patch = build_patch(args)?;

    if patch.is_empty() {
        anyhow::bail!("Nothing to change. Pass at least one of --title, --start, --end, --all-day, --location, --description, --label, --move-to");
    }

    // Validate the merged event before touching the store.
    let mut merged = app
        .store
        .find_event(id)
        .cloned()
        .ok_or(DaybookError::EventNotFound { date, id })?;
    merged.apply(patch.clone());
    validate_event(&merged, app.config.default_duration_minutes)?;

    let updated = app.store.update_event(date, id, patch)?;
    let moved = if updated.date != date {
        format!(" (moved to {})", updated.date)
    } else {
        String::new()
    };
    let message = format!("  Updated: {}{}", updated.title, moved);

    app.save()?;
    println!("{}", message.green());

    Ok(id)
}
