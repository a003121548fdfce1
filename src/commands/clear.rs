use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use super::App;

/// Delete every event. Asks first unless `yes` is set.
pub fn run(app: &mut App, yes: bool) -> Result<usize> {
    let count = app.store.event_count();
    if count == 0 {
        println!("{}", "  No events to delete".dimmed());
        return Ok(0);
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("  Delete all {} events?", count))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "  Cancelled".dimmed());
            return Ok(0);
        }
    }

    app.store.delete_all_events();
    app.save()?;

    println!("{}", format!("  Deleted {} events", count).red());

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use daybook_core::{DateKey, Event};

    #[test]
    fn clears_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        let day: DateKey = "2025-04-24".parse().unwrap();
        app.store.add_event(Event::all_day("One", day));
        app.store.add_event(Event::all_day("Two", day.add_days(3).unwrap()));

        assert_eq!(run(&mut app, true).unwrap(), 2);
        assert_eq!(reload(&app).store.event_count(), 0);

        // Nothing left: no prompt, no write.
        assert_eq!(run(&mut app, false).unwrap(), 0);
    }
}
