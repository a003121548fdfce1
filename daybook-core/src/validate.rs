//! Checks run before an event is handed to the store.

use crate::error::{DaybookError, DaybookResult};
use crate::event::Event;
use crate::time_of_day::{MINUTES_PER_DAY, format_minutes_24h, parse_minutes};

/// Resolved minute range of a valid timed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start_minute: u32,
    pub end_minute: u32,
}

/// Validate a new or edited event.
///
/// The title must be non-empty after trimming. A timed event needs a
/// parseable start, a parseable end if one is given, and must end after it
/// starts (`default_duration` applies when no end is given, capped at the
/// end of the day). Returns the resolved range for timed events.
pub fn validate_event(event: &Event, default_duration: u32) -> DaybookResult<Option<TimeRange>> {
    if event.title.trim().is_empty() {
        return Err(DaybookError::EmptyTitle);
    }

    let Some(start) = event.start_time() else {
        return Ok(None);
    };
    let start_minute = parse_minutes(start)?;

    let end_minute = match event.end_time.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        Some(end) => parse_minutes(end)?,
        None => start_minute.saturating_add(default_duration).min(MINUTES_PER_DAY),
    };

    if end_minute <= start_minute {
        return Err(DaybookError::InvalidTimeRange {
            start: format_minutes_24h(start_minute),
            end: format_minutes_24h(end_minute),
        });
    }

    Ok(Some(TimeRange {
        start_minute,
        end_minute,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_key::DateKey;

    fn day() -> DateKey {
        DateKey::from_ymd(2025, 4, 24).unwrap()
    }

    #[test]
    fn all_day_event_only_needs_a_title() {
        assert_eq!(validate_event(&Event::all_day("Holiday", day()), 60).unwrap(), None);
    }

    #[test]
    fn blank_title_is_rejected() {
        let event = Event::all_day("   ", day());
        assert!(matches!(validate_event(&event, 60), Err(DaybookError::EmptyTitle)));
    }

    #[test]
    fn end_must_follow_start() {
        let same = Event::timed("Zero", day(), "10:00", Some("10:00"));
        assert!(matches!(
            validate_event(&same, 60),
            Err(DaybookError::InvalidTimeRange { .. })
        ));

        let backwards = Event::timed("Backwards", day(), "2:00 PM", Some("1:00 PM"));
        let err = validate_event(&backwards, 60).unwrap_err();
        assert_eq!(err.to_string(), "End time must be after start time (14:00 - 13:00)");
    }

    #[test]
    fn missing_end_uses_default_duration() {
        let event = Event::timed("Coffee", day(), "9:30", None);
        let range = validate_event(&event, 60).unwrap().unwrap();
        assert_eq!((range.start_minute, range.end_minute), (570, 630));
    }

    #[test]
    fn huge_default_duration_stops_at_end_of_day() {
        let event = Event::timed("All evening", day(), "18:00", None);
        let range = validate_event(&event, u32::MAX).unwrap().unwrap();
        assert_eq!((range.start_minute, range.end_minute), (1080, MINUTES_PER_DAY));
    }

    #[test]
    fn unparseable_times_are_rejected() {
        let event = Event::timed("Vague", day(), "after lunch", None);
        assert!(matches!(
            validate_event(&event, 60),
            Err(DaybookError::UnparseableTime(_))
        ));

        let event = Event::timed("Vague end", day(), "9:00", Some("later"));
        assert!(matches!(
            validate_event(&event, 60),
            Err(DaybookError::UnparseableTime(_))
        ));
    }
}
