//! Date-keyed event store.
//!
//! The store owns every event and the current day selection. It does no
//! validation: titles and time ranges are checked by the caller before an
//! event reaches it (see [`crate::validate`]). Events are addressed by
//! `(date, id)`; positional variants exist for list views and fail with
//! `IndexOutOfRange` instead of dropping the write.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::date_key::DateKey;
use crate::error::{DaybookError, DaybookResult};
use crate::event::{Event, EventId, EventPatch};
use crate::time_of_day::parse_minutes;

/// Events per day, each bucket in insertion order.
pub type EventsByDate = BTreeMap<DateKey, Vec<Event>>;

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarStore {
    selected_date: Option<DateKey>,
    events_by_date: EventsByDate,
}

impl Default for CalendarStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarStore {
    /// An empty store with today selected.
    pub fn new() -> Self {
        Self::with_selection(Some(DateKey::today()))
    }

    pub fn with_selection(selected_date: Option<DateKey>) -> Self {
        CalendarStore {
            selected_date,
            events_by_date: EventsByDate::new(),
        }
    }

    // SELECTION:

    pub fn selected_date(&self) -> Option<DateKey> {
        self.selected_date
    }

    pub fn set_selected_date(&mut self, date: Option<DateKey>) {
        self.selected_date = date;
    }

    /// Select `date`, or clear the selection if it is already selected.
    pub fn toggle_selected_date(&mut self, date: DateKey) -> Option<DateKey> {
        self.selected_date = if self.selected_date == Some(date) {
            None
        } else {
            Some(date)
        };
        self.selected_date
    }

    /// Called when the visible month/week changes. The week view keeps its
    /// selection; other views drop it.
    pub fn navigate(&mut self, preserve_selection: bool) {
        if !preserve_selection {
            self.selected_date = None;
        }
    }

    /// Events of the selected day, empty when nothing is selected.
    pub fn selected_events(&self) -> &[Event] {
        match self.selected_date {
            Some(date) => self.events_for_date(date),
            None => &[],
        }
    }

    // READS:

    /// Events for `date` in insertion order. Never creates a bucket.
    pub fn events_for_date(&self, date: DateKey) -> &[Event] {
        self.events_by_date
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn events_by_date(&self) -> &EventsByDate {
        &self.events_by_date
    }

    pub fn event_count(&self) -> usize {
        self.events_by_date.values().map(Vec::len).sum()
    }

    pub fn find_event(&self, id: EventId) -> Option<&Event> {
        self.events_by_date.values().flatten().find(|e| e.id == id)
    }

    /// List-view order for a day: timed events by start time, then all-day
    /// events in insertion order.
    pub fn agenda(&self, date: DateKey) -> Vec<&Event> {
        let (all_day, timed): (Vec<&Event>, Vec<&Event>) = self
            .events_for_date(date)
            .iter()
            .partition(|e| e.is_all_day());

        let mut timed: Vec<(u32, &Event)> = timed
            .into_iter()
            .map(|e| (e.start_time().and_then(|t| parse_minutes(t).ok()).unwrap_or(0), e))
            .collect();
        timed.sort_by_key(|(start, _)| *start);

        timed.into_iter().map(|(_, e)| e).chain(all_day).collect()
    }

    /// Colors for the month-cell dots: the first `limit` events of the day,
    /// with `default_color` standing in for unlabeled events.
    pub fn preview_colors<'a>(&'a self, date: DateKey, limit: usize, default_color: &'a str) -> Vec<&'a str> {
        self.events_for_date(date)
            .iter()
            .take(limit)
            .map(|e| e.color_or(default_color))
            .collect()
    }

    // WRITES:

    /// Append `event` to its date's bucket. The store assigns a fresh id and
    /// resets `completed`.
    pub fn add_event(&mut self, mut event: Event) -> EventId {
        event.id = EventId::new();
        event.completed = false;

        let id = event.id;
        let date = event.date;
        debug!(%date, %id, title = %event.title, "adding event");
        self.events_by_date.entry(date).or_default().push(event);
        id
    }

    /// Append `event` to the bucket for `date`, overriding `event.date`.
    pub fn add_event_on(&mut self, date: DateKey, mut event: Event) -> EventId {
        event.date = date;
        self.add_event(event)
    }

    /// Replace every bucket. Each event's `date` is set to its bucket key, and
    /// an event whose id was already seen gets a fresh one so ids stay unique.
    pub fn set_events_by_date(&mut self, mut events_by_date: EventsByDate) {
        let mut seen = HashSet::new();
        for (date, events) in events_by_date.iter_mut() {
            for event in events.iter_mut() {
                event.date = *date;
                if !seen.insert(event.id) {
                    let old = event.id;
                    event.id = EventId::new();
                    debug!(%date, %old, new = %event.id, "re-stamping duplicate event id");
                    seen.insert(event.id);
                }
            }
        }
        debug!(days = events_by_date.len(), "replacing all events");
        self.events_by_date = events_by_date;
    }

    fn position(&self, date: DateKey, id: EventId) -> DaybookResult<usize> {
        self.events_for_date(date)
            .iter()
            .position(|e| e.id == id)
            .ok_or(DaybookError::EventNotFound { date, id })
    }

    fn event_at(&self, date: DateKey, index: usize) -> DaybookResult<&Event> {
        let events = self.events_for_date(date);
        events.get(index).ok_or(DaybookError::IndexOutOfRange {
            date,
            index,
            len: events.len(),
        })
    }

    fn check_index(&self, date: DateKey, index: usize) -> DaybookResult<()> {
        self.event_at(date, index).map(|_| ())
    }

    /// Shallow-merge `patch` into the event `id` on `date` and return the
    /// updated event. A patch that changes the date moves the event to the
    /// end of the new day's bucket.
    pub fn update_event(&mut self, date: DateKey, id: EventId, patch: EventPatch) -> DaybookResult<&Event> {
        let index = self.position(date, id)?;
        self.update_event_at(date, index, patch)
    }

    /// Positional form of [`update_event`](Self::update_event).
    pub fn update_event_at(
        &mut self,
        date: DateKey,
        index: usize,
        patch: EventPatch,
    ) -> DaybookResult<&Event> {
        self.check_index(date, index)?;

        let moved_to = patch.date.filter(|new_date| *new_date != date);
        let bucket = self.events_by_date.entry(date).or_default();
        bucket[index].apply(patch);
        debug!(%date, index, id = %bucket[index].id, "updated event");

        let (date, index) = match moved_to {
            Some(new_date) => {
                let event = bucket.remove(index);
                debug!(from = %date, to = %new_date, id = %event.id, "moving event");
                let target = self.events_by_date.entry(new_date).or_default();
                target.push(event);
                (new_date, target.len() - 1)
            }
            None => (date, index),
        };
        self.event_at(date, index)
    }

    /// Remove the event `id` from `date`, returning it.
    pub fn delete_event(&mut self, date: DateKey, id: EventId) -> DaybookResult<Event> {
        let index = self.position(date, id)?;
        self.delete_event_at(date, index)
    }

    /// Remove the event at `index`; later events shift down by one.
    pub fn delete_event_at(&mut self, date: DateKey, index: usize) -> DaybookResult<Event> {
        self.check_index(date, index)?;

        let event = self.events_by_date.entry(date).or_default().remove(index);
        debug!(%date, index, id = %event.id, "deleted event");
        Ok(event)
    }

    /// Flip `completed` on the event `id`, returning the new value.
    pub fn toggle_completed(&mut self, date: DateKey, id: EventId) -> DaybookResult<bool> {
        let index = self.position(date, id)?;
        let bucket = self.events_by_date.entry(date).or_default();
        let event = &mut bucket[index];
        event.completed = !event.completed;
        debug!(%date, %id, completed = event.completed, "toggled event");
        Ok(event.completed)
    }

    /// Drop every event. The selection is left alone.
    pub fn delete_all_events(&mut self) {
        debug!(count = self.event_count(), "deleting all events");
        self.events_by_date.clear();
    }
}
