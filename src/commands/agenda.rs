use anyhow::Result;
use daybook_core::DateKey;

use super::App;
use crate::render::render_agenda;
use crate::utils::input::parse_date;

pub fn run(app: &App, date: Option<&str>) -> Result<()> {
    let today = DateKey::today();
    let date = match date {
        Some(d) => parse_date(d)?,
        None => today,
    };

    println!("{}", render_agenda(&app.store, date, today));
    Ok(())
}
