use anyhow::Result;
use daybook_core::DateKey;
use daybook_core::grid::WeekCursor;

use super::App;
use crate::render::render_week;
use crate::utils::input::parse_date;

/// The Sunday-first week containing `date`, `offset` weeks away.
pub fn view(app: &mut App, date: Option<&str>, offset: i32, today: DateKey) -> Result<String> {
    let anchor = match date {
        Some(d) => parse_date(d)?,
        None => today,
    };
    app.store.set_selected_date(Some(anchor));

    let cursor = WeekCursor::containing(anchor)?.offset(i64::from(offset))?;
    // Paging weeks keeps the selected day.
    app.store.navigate(true);

    Ok(render_week(&cursor.days()?, &app.store, today, &app.config))
}

pub fn run(app: &mut App, date: Option<&str>, offset: i32) -> Result<()> {
    println!("{}", view(app, date, offset, DateKey::today())?);
    Ok(())
}
