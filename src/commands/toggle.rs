use anyhow::Result;
use owo_colors::OwoColorize;

use super::App;
use crate::utils::input::{parse_date, resolve_target};

/// Flip an event's completed flag. Returns the new state.
pub fn run(app: &mut App, date: &str, target: &str) -> Result<bool> {
    let date = parse_date(date)?;
    let id = resolve_target(&app.store, date, target)?;

    let completed = app.store.toggle_completed(date, id)?;
    app.save()?;

    let title = app
        .store
        .find_event(id)
        .map(|e| e.title.clone())
        .unwrap_or_default();
    if completed {
        println!("{}", format!("  Done: {}", title).green());
    } else {
        println!("{}", format!("  Reopened: {}", title).yellow());
    }

    Ok(completed)
}
