//! Minutes-of-day parsing and formatting.
//!
//! Event times are free-form strings. Both 24-hour (`14:30`) and 12-hour
//! (`2:30 PM`, `2pm`) forms are accepted, plus `noon` and `midnight`.

use chrono::{NaiveTime, Timelike};

use crate::error::{DaybookError, DaybookResult};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Clock forms handed to chrono, tried in order.
const CLOCK_FORMATS: [&str; 6] = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p", "%I:%M:%S %p", "%I:%M:%S%p"];

/// Parse a time string into minutes since midnight (0..=1439).
pub fn parse_minutes(input: &str) -> DaybookResult<u32> {
    let unparseable = || DaybookError::UnparseableTime(input.to_string());

    let upper = input.trim().to_ascii_uppercase();
    match upper.as_str() {
        "NOON" => return Ok(12 * 60),
        "MIDNIGHT" => return Ok(0),
        _ => {}
    }

    if !upper.contains(':') {
        return bare_hour(&upper).ok_or_else(unparseable);
    }

    // chrono reads "10:5" as 10:05; minutes and seconds must be two digits
    let padded = upper
        .split(':')
        .skip(1)
        .all(|field| field.bytes().take_while(u8::is_ascii_digit).count() == 2);
    if !padded {
        return Err(unparseable());
    }

    CLOCK_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&upper, format).ok())
        .map(|time| time.num_seconds_from_midnight() / 60)
        .ok_or_else(unparseable)
}

/// An hour with no minutes ("9am", "11 PM"). Only unambiguous with am/pm.
fn bare_hour(s: &str) -> Option<u32> {
    let (hour, pm) = if let Some(rest) = s.strip_suffix("AM") {
        (rest.trim_end(), false)
    } else {
        (s.strip_suffix("PM")?.trim_end(), true)
    };

    if hour.is_empty() || hour.len() > 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u32 = hour.parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }

    let hour = if pm { hour % 12 + 12 } else { hour % 12 };
    Some(hour * 60)
}

/// Format minutes as `HH:MM`. Values past the end of the day render as `24:00`.
pub fn format_minutes_24h(minutes: u32) -> String {
    let minutes = minutes.min(MINUTES_PER_DAY);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Format minutes as `h:mm AM/PM`.
pub fn format_minutes_12h(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    let (hour, minute) = (minutes / 60, minutes % 60);
    let period = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, minute, period)
}

/// Round to the nearest multiple of `step` minutes (time pickers use 5).
pub fn round_to_step(minutes: u32, step: u32) -> u32 {
    if step == 0 {
        return minutes;
    }
    ((minutes + step / 2) / step) * step
}
