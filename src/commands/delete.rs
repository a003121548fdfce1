use anyhow::Result;
use daybook_core::Event;
use owo_colors::OwoColorize;

use super::App;
use crate::utils::input::{parse_date, resolve_target};

pub fn run(app: &mut App, date: &str, target: &str) -> Result<Event> {
    let date = parse_date(date)?;
    let id = resolve_target(&app.store, date, target)?;

    let removed = app.store.delete_event(date, id)?;
    app.save()?;

    println!("{}", format!("  Deleted: {}", removed.title).red());

    Ok(removed)
}
