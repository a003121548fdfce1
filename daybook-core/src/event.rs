//! Event types.
//!
//! An event lives in exactly one date bucket of the store. Its `time` and
//! `end_time` stay free-form strings as entered; the layout engine and the
//! validator turn them into minutes-of-day when needed.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date_key::DateKey;

/// Color used for events without a label.
pub const DEFAULT_LABEL_COLOR: &str = "#007aff";

/// Stable identifier for an event, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        EventId(Uuid::new_v4())
    }

    /// First 8 hex characters, enough to pick an event out of one day.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }

    /// Whether the hyphen-less form of this id starts with `prefix`.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        let prefix = prefix.replace('-', "").to_ascii_lowercase();
        !prefix.is_empty() && self.0.simple().to_string().starts_with(&prefix)
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named color tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub color: String,
}

impl Label {
    pub fn new(name: &str, color: &str) -> Self {
        Label {
            name: name.to_string(),
            color: color.to_string(),
        }
    }

    /// Look up a palette label by name, ignoring case.
    pub fn from_palette(name: &str) -> Option<Label> {
        LABEL_PALETTE
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(n, c)| Label::new(n, c))
    }
}

/// Labels offered when creating an event.
pub const LABEL_PALETTE: [(&str, &str); 8] = [
    ("Red", "#ff4d4d"),
    ("Orange", "#ffa500"),
    ("Blue", DEFAULT_LABEL_COLOR),
    ("Green", "#28a745"),
    ("Pink", "#e91e63"),
    ("Purple", "#9c27b0"),
    ("Teal", "#009688"),
    ("Brown", "#795548"),
];

/// A calendar event or task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub id: EventId,
    pub title: String,
    pub date: DateKey,
    /// Start time; absent (or blank) means all-day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default)]
    pub completed: bool,
}

impl Event {
    pub fn all_day(title: &str, date: DateKey) -> Self {
        Event {
            id: EventId::new(),
            title: title.to_string(),
            date,
            time: None,
            end_time: None,
            description: None,
            location: None,
            label: None,
            completed: false,
        }
    }

    pub fn timed(title: &str, date: DateKey, time: &str, end_time: Option<&str>) -> Self {
        Event {
            time: Some(time.to_string()),
            end_time: end_time.map(String::from),
            ..Self::all_day(title, date)
        }
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    /// The start time, if one is set and not blank.
    pub fn start_time(&self) -> Option<&str> {
        self.time.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    pub fn is_all_day(&self) -> bool {
        self.start_time().is_none()
    }

    /// Label color, or the default color for unlabeled events.
    pub fn color(&self) -> &str {
        self.color_or(DEFAULT_LABEL_COLOR)
    }

    pub fn color_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.label.as_ref().map(|l| l.color.as_str()).unwrap_or(default)
    }

    /// Shallow-merge `patch` into this event. Fields the patch leaves as
    /// `None` are preserved.
    pub fn apply(&mut self, patch: EventPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(time) = patch.time {
            self.time = time;
        }
        if let Some(end_time) = patch.end_time {
            self.end_time = end_time;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Partial update for an event.
///
/// Optional event fields use a double `Option`: `None` leaves the field
/// alone, `Some(None)` clears it, `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<DateKey>,
    pub time: Option<Option<String>>,
    pub end_time: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub label: Option<Option<Label>>,
    pub completed: Option<bool>,
}

impl EventPatch {
    pub fn title(title: &str) -> Self {
        EventPatch {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    pub fn completed(completed: bool) -> Self {
        EventPatch {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == EventPatch::default()
    }
}
