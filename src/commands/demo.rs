use anyhow::Result;
use daybook_core::DateKey;
use daybook_core::sample::generate_month_events;
use owo_colors::OwoColorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::App;
use crate::utils::input::parse_date;

/// Fill the month around `date` with random events. A seed makes the
/// output reproducible.
pub fn run(app: &mut App, date: Option<&str>, seed: Option<u64>) -> Result<usize> {
    let anchor = match date {
        Some(d) => parse_date(d)?,
        None => DateKey::today(),
    };
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let events = generate_month_events(anchor, &mut rng)?;
    let count = events.len();
    for event in events {
        app.store.add_event(event);
    }
    app.save()?;

    println!(
        "{}",
        format!("  Added {} demo events to {}", count, anchor.date().format("%B %Y")).green()
    );

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;

    #[test]
    fn seeded_demo_fills_the_month() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        let count = run(&mut app, Some("2025-02-14"), Some(7)).unwrap();

        let saved = reload(&app);
        assert_eq!(saved.store.event_count(), count);
        assert!(
            saved
                .store
                .events_by_date()
                .keys()
                .all(|date| (date.year(), date.month()) == (2025, 2))
        );
    }
}
