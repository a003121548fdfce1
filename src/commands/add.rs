use anyhow::Result;
use clap::Args;
use daybook_core::validate::validate_event;
use daybook_core::{DateKey, Event, EventId};
use dialoguer::Input;
use owo_colors::OwoColorize;

use super::{App, prompt_optional, resolve_label};
use crate::utils::input::{end_after, normalize_time, parse_date};

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Event title (prompts for the rest when omitted)
    pub title: Option<String>,

    /// Day of the event (e.g. "2025-04-24", "tomorrow", "next fri"). Defaults to today
    #[arg(short = 'D', long)]
    pub date: Option<String>,

    /// Start time (e.g. "09:30", "2:30 PM"). Omit for an all-day event
    #[arg(short, long)]
    pub start: Option<String>,

    /// End time
    #[arg(short, long, requires = "start", conflicts_with = "duration")]
    pub end: Option<String>,

    /// Duration (e.g. "30m", "1h", "1h30m")
    #[arg(short, long, requires = "start", conflicts_with = "end")]
    pub duration: Option<String>,

    /// Event location
    #[arg(short, long)]
    pub location: Option<String>,

    /// Event description
    #[arg(long)]
    pub description: Option<String>,

    /// Label name from the palette (Red, Orange, Blue, Green, Pink, Purple, Teal, Brown)
    #[arg(long)]
    pub label: Option<String>,
}

pub fn run(app: &mut App, args: AddArgs) -> Result<EventId> {
    let interactive = args.title.is_none();

    // --- Title ---
    let title = match args.title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?,
    };

    // --- Date ---
    let date = match args.date {
        Some(d) => parse_date(&d)?,
        None if interactive => prompt_optional("  When? (today)", parse_date)?.unwrap_or_else(DateKey::today),
        None => DateKey::today(),
    };

    // --- Start / End ---
    let start = match args.start {
        Some(s) => Some(normalize_time(&s)?),
        None if interactive => prompt_optional("  Starts at? (all-day)", normalize_time)?,
        None => None,
    };

    let end = match (&start, args.end, args.duration) {
        (None, _, _) => None,
        (Some(_), Some(e), _) => Some(normalize_time(&e)?),
        (Some(s), None, Some(d)) => Some(end_after(s, &d)?),
        (Some(s), None, None) if interactive => {
            let hint = format!("  How long? ({} min)", app.config.default_duration_minutes);
            prompt_optional(&hint, |d| end_after(s, d))?
        }
        (Some(_), None, None) => None,
    };

    // --- Location ---
    let location = match args.location {
        Some(loc) => Some(loc),
        None if interactive => prompt_optional("  Where? (skip)", |l| Ok(l.trim().to_string()))?,
        None => None,
    };

    let label = match args.label {
        Some(name) => resolve_label(&name)?,
        None => None,
    };

    let mut event = match &start {
        Some(s) => Event::timed(&title, date, s, end.as_deref()),
        None => Event::all_day(&title, date),
    };
    event.location = location.filter(|l| !l.trim().is_empty());
    event.description = args.description.filter(|d| !d.trim().is_empty());
    event.label = label;

    validate_event(&event, app.config.default_duration_minutes)?;

    let id = app.store.add_event(event);
    app.save()?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {} on {}", title, date).green());

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use daybook_core::DaybookError;

    fn args(title: &str) -> AddArgs {
        AddArgs {
            title: Some(title.to_string()),
            date: Some("2025-04-24".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn adds_all_day_event() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        let id = run(&mut app, args("Holiday")).unwrap();

        let saved = reload(&app);
        let event = saved.store.find_event(id).unwrap();
        assert!(event.is_all_day());
        assert_eq!(event.date.to_string(), "2025-04-24");
    }

    #[test]
    fn normalizes_times_and_applies_duration() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        let id = run(
            &mut app,
            AddArgs {
                start: Some("2:30 PM".to_string()),
                duration: Some("45m".to_string()),
                location: Some("Office".to_string()),
                label: Some("green".to_string()),
                ..args("Review")
            },
        )
        .unwrap();

        let event = app.store.find_event(id).unwrap();
        assert_eq!(event.time.as_deref(), Some("14:30"));
        assert_eq!(event.end_time.as_deref(), Some("15:15"));
        assert_eq!(event.location.as_deref(), Some("Office"));
        assert_eq!(event.color(), "#28a745");
    }

    #[test]
    fn rejects_end_before_start() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        let err = run(
            &mut app,
            AddArgs {
                start: Some("15:00".to_string()),
                end: Some("14:00".to_string()),
                ..args("Backwards")
            },
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DaybookError>(),
            Some(DaybookError::InvalidTimeRange { .. })
        ));
        assert_eq!(app.store.event_count(), 0);
        assert!(!dir.path().join("events.json").exists());
    }

    #[test]
    fn rejects_blank_title_and_unknown_label() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        assert!(run(&mut app, args("   ")).is_err());
        assert!(
            run(
                &mut app,
                AddArgs {
                    label: Some("Plaid".to_string()),
                    ..args("Party")
                }
            )
            .is_err()
        );
        assert_eq!(app.store.event_count(), 0);
    }
}
