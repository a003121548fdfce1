//! Random demo events for filling an empty calendar.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::date_key::DateKey;
use crate::error::DaybookResult;
use crate::event::{DEFAULT_LABEL_COLOR, Event, Label};
use crate::grid::days_in_month;
use crate::time_of_day::format_minutes_12h;

const EVENT_TITLES: [&str; 8] = ["Meeting", "Lunch", "Coffee", "Gym", "Study", "Movie", "Dinner", "Shopping"];
const LOCATIONS: [&str; 7] = ["Office", "Cafe", "Home", "Park", "Mall", "Restaurant", "Library"];
const COLORS: [&str; 8] = [
    "#ff4d4d", "#ffa500", "#007aff", "#28a745", "#e91e63", "#9c27b0", "#009688", "#795548",
];

/// Inclusive start-hour ranges busy days draw from.
const DAY_SEGMENTS: [(u32, u32); 4] = [(7, 10), (11, 13), (14, 16), (17, 20)];

const BUSY_DAYS: usize = 3;

/// Generate a month of demo events around the month of `anchor`.
///
/// Three busy days get 4-6 events each with distinct start hours spread
/// over the day; 10-15 more single events land on other days.
pub fn generate_month_events<R: Rng + ?Sized>(anchor: DateKey, rng: &mut R) -> DaybookResult<Vec<Event>> {
    let num_days = days_in_month(anchor.year(), anchor.month())?;
    let first = DateKey::from_ymd(anchor.year(), anchor.month(), 1)?;
    let mut events = Vec::new();

    let mut busy_days = BTreeSet::new();
    while busy_days.len() < BUSY_DAYS {
        busy_days.insert(rng.random_range(1..=num_days));
    }

    for &day in &busy_days {
        let date = first.add_days(i64::from(day) - 1)?;
        let count = rng.random_range(4..=6);
        let mut used_hours = BTreeSet::new();

        for _ in 0..count {
            let open_segments: Vec<_> = DAY_SEGMENTS
                .iter()
                .filter(|(start, end)| (*start..=*end).any(|h| !used_hours.contains(&h)))
                .collect();
            let Some(&&(start, end)) = open_segments.choose(rng) else {
                break;
            };

            let free_hours: Vec<u32> = (start..=end).filter(|h| !used_hours.contains(h)).collect();
            let Some(&hour) = free_hours.choose(rng) else {
                break;
            };
            used_hours.insert(hour);
            events.push(event_at(date, hour, rng));
        }
    }

    let remaining = rng.random_range(10..=15);
    for _ in 0..remaining {
        let day = rng.random_range(1..=num_days);
        if busy_days.contains(&day) {
            continue;
        }
        let date = first.add_days(i64::from(day) - 1)?;
        let hour = rng.random_range(7..=20);
        events.push(event_at(date, hour, rng));
    }

    Ok(events)
}

fn event_at<R: Rng + ?Sized>(date: DateKey, hour: u32, rng: &mut R) -> Event {
    let start = hour * 60 + rng.random_range(0..12) * 5;
    let duration = rng.random_range(1..=6) * 30;

    let title = EVENT_TITLES.choose(rng).copied().unwrap_or("Meeting");
    let location = LOCATIONS.choose(rng).copied().unwrap_or("Home");
    let color = COLORS.choose(rng).copied().unwrap_or(DEFAULT_LABEL_COLOR);

    let end = format_minutes_12h(start + duration);
    Event::timed(title, date, &format_minutes_12h(start), Some(end.as_str()))
        .with_location(location)
        .with_label(Label::new("Random", color))
}
