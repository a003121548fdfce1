use anyhow::Result;
use daybook_core::DateKey;
use daybook_core::grid::MonthCursor;

use super::App;
use crate::render::{render_agenda, render_month};
use crate::utils::input::{parse_date, parse_month};

/// Month grid, plus the selected day's events when the selection is in view.
pub fn view(app: &mut App, month: Option<&str>, offset: i32, select: Option<&str>, today: DateKey) -> Result<String> {
    if let Some(date) = select {
        app.store.set_selected_date(Some(parse_date(date)?));
    }

    let cursor = match month {
        Some(m) => parse_month(m)?,
        None => MonthCursor::containing(app.store.selected_date().unwrap_or(today)),
    }
    .offset(offset)?;

    // Leaving the selected day's month drops the selection.
    if app.store.selected_date().map(MonthCursor::containing) != Some(cursor) {
        app.store.navigate(false);
    }

    let grid = cursor.grid()?;
    let mut text = render_month(&grid, &app.store, today, &app.config);

    if let Some(selected) = app.store.selected_date() {
        text.push_str("\n\n");
        text.push_str(&render_agenda(&app.store, selected, today));
    }

    Ok(text)
}

pub fn run(app: &mut App, month: Option<&str>, offset: i32, select: Option<&str>) -> Result<()> {
    println!("{}", view(app, month, offset, select, DateKey::today())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use daybook_core::Event;

    fn day() -> DateKey {
        "2025-04-24".parse().unwrap()
    }

    #[test]
    fn selection_in_view_shows_its_events() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        app.store.add_event(Event::all_day("Trip", day()));

        let text = view(&mut app, None, 0, Some("2025-04-24"), day()).unwrap();

        assert!(text.contains("April 2025"));
        assert!(text.contains("Trip"));
        assert_eq!(app.store.selected_date(), Some(day()));
    }

    #[test]
    fn paging_away_clears_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        app.store.add_event(Event::all_day("Trip", day()));

        let text = view(&mut app, None, 1, Some("2025-04-24"), day()).unwrap();

        assert!(text.contains("May 2025"));
        assert!(!text.contains("Trip"));
        assert_eq!(app.store.selected_date(), None);
    }

    #[test]
    fn explicit_month_wraps_years() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        let text = view(&mut app, Some("2025-01"), -1, None, day()).unwrap();
        assert!(text.contains("December 2024"));
        assert!(view(&mut app, Some("2025-00"), 0, None, day()).is_err());
    }

    #[test]
    fn huge_offset_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        assert!(view(&mut app, Some("2025-04"), i32::MAX, None, day()).is_err());
        assert!(view(&mut app, Some("2025-04"), -99_999_999, None, day()).is_err());
    }
}
