//! Parsing of command-line arguments into calendar values.

use anyhow::{Context, Result};
use daybook_core::grid::MonthCursor;
use daybook_core::time_of_day::{MINUTES_PER_DAY, format_minutes_24h, parse_minutes};
use daybook_core::{CalendarStore, DateKey, DaybookError, EventId};

/// Targets shorter than this that parse as a number are positions;
/// anything else is an id prefix.
const MAX_POSITION_DIGITS: usize = 8;

/// Expand common abbreviations that fuzzydate doesn't handle.
pub fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    let lower = input.to_lowercase();
    lower
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| *full)
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a date argument: "YYYY-MM-DD" or natural language ("tomorrow",
/// "next fri", "march 20").
pub fn parse_date(input: &str) -> Result<DateKey> {
    if let Ok(key) = input.trim().parse::<DateKey>() {
        return Ok(key);
    }

    let expanded = expand_abbreviations(input);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))?;

    Ok(DateKey::new(dt.date()))
}

/// Parse a "YYYY-MM" month argument.
pub fn parse_month(input: &str) -> Result<MonthCursor> {
    let (year, month) = input
        .trim()
        .split_once('-')
        .ok_or_else(|| anyhow::anyhow!("Invalid month '{}'. Expected YYYY-MM", input))?;

    let year: i32 = year
        .parse()
        .with_context(|| format!("Invalid year in '{}'", input))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("Invalid month in '{}'", input))?;

    Ok(MonthCursor::new(year, month)?)
}

/// Normalize a time argument to the stored "HH:MM" form.
pub fn normalize_time(input: &str) -> Result<String> {
    Ok(format_minutes_24h(parse_minutes(input)?))
}

/// End time `duration` after `start`, e.g. "45m" or "1h30m".
pub fn end_after(start: &str, duration: &str) -> Result<String> {
    let start_minute = parse_minutes(start)?;
    let std_dur = humantime::parse_duration(duration)
        .map_err(|e| anyhow::anyhow!("Could not parse duration: \"{}\" ({})", duration, e))?;

    let minutes = u32::try_from(std_dur.as_secs() / 60).context("Duration too large")?;
    let end_minute = start_minute.saturating_add(minutes);

    if end_minute >= MINUTES_PER_DAY {
        anyhow::bail!("Events must end before midnight ({} + {})", start, duration);
    }

    Ok(format_minutes_24h(end_minute))
}

/// Resolve an event argument on `date`: a 0-based position in the day's
/// stored order, or a prefix of the event id.
pub fn resolve_target(store: &CalendarStore, date: DateKey, target: &str) -> Result<EventId> {
    let events = store.events_for_date(date);
    let target = target.trim();

    if target.len() < MAX_POSITION_DIGITS
        && let Ok(index) = target.parse::<usize>()
    {
        return events.get(index).map(|e| e.id).ok_or_else(|| {
            DaybookError::IndexOutOfRange {
                date,
                index,
                len: events.len(),
            }
            .into()
        });
    }

    let matches: Vec<_> = events.iter().filter(|e| e.id.matches_prefix(target)).collect();
    match matches.as_slice() {
        [event] => Ok(event.id),
        [] => anyhow::bail!("No event matching '{}' on {}", target, date),
        _ => anyhow::bail!(
            "'{}' matches {} events on {}. Use more of the id",
            target,
            matches.len(),
            date
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybook_core::Event;

    fn day() -> DateKey {
        "2025-04-24".parse().unwrap()
    }

    // --- expand_abbreviations ---

    #[test]
    fn expand_day_abbreviations() {
        assert_eq!(expand_abbreviations("sat"), "saturday");
        assert_eq!(expand_abbreviations("next fri"), "next friday");
        assert_eq!(expand_abbreviations("Tues"), "tuesday");
    }

    #[test]
    fn expand_month_abbreviations() {
        assert_eq!(expand_abbreviations("jan 20"), "january 20");
        assert_eq!(expand_abbreviations("sept 5"), "september 5");
    }

    #[test]
    fn expand_preserves_non_abbreviations() {
        assert_eq!(expand_abbreviations("tomorrow"), "tomorrow");
        assert_eq!(expand_abbreviations("next  monday"), "next monday");
    }

    // --- parse_date ---

    #[test]
    fn parse_date_key() {
        assert_eq!(parse_date("2025-04-24").unwrap(), day());
    }

    #[test]
    fn parse_date_natural_language() {
        let date = parse_date("march 20").unwrap();
        assert_eq!((date.month(), date.day()), (3, 20));

        let tomorrow = parse_date("tomorrow").unwrap();
        assert_eq!(tomorrow, DateKey::today().add_days(1).unwrap());
    }

    #[test]
    fn parse_date_invalid_input() {
        assert!(parse_date("not a date at all xyz").is_err());
    }

    // --- parse_month ---

    #[test]
    fn parse_month_accepts_year_and_month() {
        let cursor = parse_month("2025-04").unwrap();
        assert_eq!((cursor.year, cursor.month), (2025, 4));
    }

    #[test]
    fn parse_month_rejects_bad_input() {
        assert!(parse_month("2025").is_err());
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("april").is_err());
    }

    // --- times ---

    #[test]
    fn normalize_time_to_24h() {
        assert_eq!(normalize_time("2:30 PM").unwrap(), "14:30");
        assert_eq!(normalize_time("9:05").unwrap(), "09:05");
        assert!(normalize_time("later").is_err());
    }

    #[test]
    fn end_after_duration() {
        assert_eq!(end_after("15:00", "45m").unwrap(), "15:45");
        assert_eq!(end_after("9:00 AM", "1h 30m").unwrap(), "10:30");
    }

    #[test]
    fn end_after_rejects_past_midnight() {
        assert!(end_after("23:00", "2h").is_err());
        assert!(end_after("15:00", "soon").is_err());
    }

    // --- resolve_target ---

    #[test]
    fn resolve_by_position() {
        let mut store = CalendarStore::with_selection(None);
        store.add_event(Event::all_day("First", day()));
        let second = store.add_event(Event::all_day("Second", day()));

        assert_eq!(resolve_target(&store, day(), "1").unwrap(), second);
        assert!(resolve_target(&store, day(), "2").is_err());
    }

    #[test]
    fn resolve_by_id_prefix() {
        let mut store = CalendarStore::with_selection(None);
        let id = store.add_event(Event::all_day("Only", day()));

        assert_eq!(resolve_target(&store, day(), &id.short()).unwrap(), id);
        assert_eq!(resolve_target(&store, day(), &id.to_string()).unwrap(), id);
        assert!(resolve_target(&store, day(), "zz").is_err());
    }

    #[test]
    fn resolve_only_looks_at_the_given_day() {
        let mut store = CalendarStore::with_selection(None);
        let id = store.add_event(Event::all_day("Elsewhere", day().add_days(1).unwrap()));

        assert!(resolve_target(&store, day(), &id.short()).is_err());
        assert!(resolve_target(&store, day(), "0").is_err());
    }
}
