use anyhow::Result;
use daybook_core::DateKey;
use daybook_core::layout::{ColumnStrategy, DayLayout};

use super::App;
use crate::render::render_day;
use crate::utils::input::parse_date;

pub fn view(app: &mut App, date: Option<&str>, packed: bool, today: DateKey) -> Result<String> {
    let date = match date {
        Some(d) => parse_date(d)?,
        None => today,
    };
    app.store.set_selected_date(Some(date));

    let mut options = app.config.layout_options();
    if packed {
        options.strategy = ColumnStrategy::Packed;
    }

    let events = app.store.selected_events();
    let layout = DayLayout::new(events, &options);

    Ok(render_day(date, events, &layout, &app.config))
}

pub fn run(app: &mut App, date: Option<&str>, packed: bool) -> Result<()> {
    println!("{}", view(app, date, packed, DateKey::today())?);
    Ok(())
}
