//! Day timeline layout.
//!
//! Turns one day's events into render positions: all-day events stack in
//! rows above the timeline, timed events get a minute range plus a column
//! within their overlap group so concurrent events sit side by side.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::event::Event;
use crate::time_of_day::{MINUTES_PER_DAY, parse_minutes};

/// Duration given to timed events without a usable end time.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// How columns are handed out inside an overlap group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnStrategy {
    /// Column = position in the start-sorted group; width = 1 / group size.
    #[default]
    Sequential,
    /// Lowest free column per event (interval graph coloring); width =
    /// 1 / columns the group actually needs.
    Packed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    pub strategy: ColumnStrategy,
    pub default_duration_minutes: u32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            strategy: ColumnStrategy::Sequential,
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }
}

/// Position of a timed event on the day timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedSlot {
    pub start_minute: u32,
    pub end_minute: u32,
    /// Index of the overlap group within the day.
    pub group: usize,
    pub column: usize,
    pub total_columns: usize,
}

/// Pixel/fraction rectangle for a timed slot. `left` and `width` are
/// fractions of the day column's width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotRect {
    pub top: f32,
    pub height: f32,
    pub left: f32,
    pub width: f32,
}

impl TimedSlot {
    pub fn duration_minutes(&self) -> u32 {
        self.end_minute.saturating_sub(self.start_minute)
    }

    /// `(offset, width)` as fractions of the available width.
    pub fn horizontal(&self) -> (f32, f32) {
        let total = self.total_columns as f32;
        (self.column as f32 / total, 1.0 / total)
    }

    pub fn rect(&self, hour_height: f32) -> SlotRect {
        let (left, width) = self.horizontal();
        SlotRect {
            top: self.start_minute as f32 / 60.0 * hour_height,
            height: self.duration_minutes() as f32 / 60.0 * hour_height,
            left,
            width,
        }
    }

    pub fn overlaps(&self, other: &TimedSlot) -> bool {
        self.start_minute < other.end_minute && other.start_minute < self.end_minute
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Stacked above the timeline in input order.
    AllDay { row: usize },
    Timed(TimedSlot),
}

/// An event annotated with its layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaidOutEvent<'a> {
    pub event: &'a Event,
    /// Position of the event in the input sequence.
    pub index: usize,
    pub placement: Placement,
}

impl LaidOutEvent<'_> {
    pub fn is_all_day(&self) -> bool {
        matches!(self.placement, Placement::AllDay { .. })
    }

    pub fn slot(&self) -> Option<&TimedSlot> {
        match &self.placement {
            Placement::Timed(slot) => Some(slot),
            Placement::AllDay { .. } => None,
        }
    }
}

struct Span<'a> {
    index: usize,
    event: &'a Event,
    start: u32,
    end: u32,
}

/// Lay out one day's events with default options.
pub fn layout_day_default(events: &[Event]) -> Vec<LaidOutEvent<'_>> {
    layout_day(events, &LayoutOptions::default())
}

/// Lay out one day's events.
///
/// Returns all-day events first (row order), then timed events sorted by
/// start minute. Ties keep input order.
pub fn layout_day<'a>(events: &'a [Event], options: &LayoutOptions) -> Vec<LaidOutEvent<'a>> {
    let (all_day, timed): (Vec<_>, Vec<_>) = events
        .iter()
        .enumerate()
        .partition(|(_, event)| event.is_all_day());

    let mut laid_out: Vec<LaidOutEvent<'a>> = all_day
        .into_iter()
        .enumerate()
        .map(|(row, (index, event))| LaidOutEvent {
            event,
            index,
            placement: Placement::AllDay { row },
        })
        .collect();

    let mut spans: Vec<Span<'a>> = timed
        .into_iter()
        .map(|(index, event)| {
            let (start, end) = resolve_span(event, options.default_duration_minutes);
            Span { index, event, start, end }
        })
        .collect();
    // sort_by_key is stable, so equal starts keep input order
    spans.sort_by_key(|span| span.start);

    for (group, members) in overlap_groups(&spans).into_iter().enumerate() {
        let (columns, total_columns) = assign_columns(members, options.strategy);
        for (span, column) in members.iter().zip(columns) {
            laid_out.push(LaidOutEvent {
                event: span.event,
                index: span.index,
                placement: Placement::Timed(TimedSlot {
                    start_minute: span.start,
                    end_minute: span.end,
                    group,
                    column,
                    total_columns,
                }),
            });
        }
    }

    laid_out
}

/// Resolve an event's minute range. Falls back to midnight for an
/// unparseable start and to the default duration for a missing, unparseable
/// or non-positive end. The end never passes the end of the day.
fn resolve_span(event: &Event, default_duration: u32) -> (u32, u32) {
    let raw_start = event.start_time().unwrap_or_default();
    let start = parse_minutes(raw_start).unwrap_or_else(|_| {
        warn!(title = %event.title, time = raw_start, "unparseable start time, placing at midnight");
        0
    });

    let end = event
        .end_time
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| match parse_minutes(raw) {
            Ok(end) => Some(end),
            Err(_) => {
                warn!(title = %event.title, end_time = raw, "unparseable end time, using default duration");
                None
            }
        })
        .filter(|end| *end > start)
        .unwrap_or(start.saturating_add(default_duration.max(1)));

    (start, end.min(MINUTES_PER_DAY))
}

/// Split start-sorted spans into overlap groups. A span joins the current
/// group iff it starts before the latest end seen in that group.
fn overlap_groups<'s, 'a>(spans: &'s [Span<'a>]) -> Vec<&'s [Span<'a>]> {
    let mut groups = Vec::new();
    let mut group_start = 0;
    let mut group_end = 0;

    for (i, span) in spans.iter().enumerate() {
        if i > group_start && span.start >= group_end {
            groups.push(&spans[group_start..i]);
            group_start = i;
        }
        group_end = if i == group_start { span.end } else { group_end.max(span.end) };
    }
    if group_start < spans.len() {
        groups.push(&spans[group_start..]);
    }

    groups
}

/// Columns for each member of a group, plus the group's column count.
fn assign_columns(members: &[Span<'_>], strategy: ColumnStrategy) -> (Vec<usize>, usize) {
    match strategy {
        ColumnStrategy::Sequential => ((0..members.len()).collect(), members.len()),
        ColumnStrategy::Packed => {
            // End minute of the last span placed in each column
            let mut column_ends: Vec<u32> = Vec::new();
            let columns: Vec<usize> = members
                .iter()
                .map(|span| match column_ends.iter().position(|end| *end <= span.start) {
                    Some(column) => {
                        column_ends[column] = span.end;
                        column
                    }
                    None => {
                        column_ends.push(span.end);
                        column_ends.len() - 1
                    }
                })
                .collect();
            (columns, column_ends.len())
        }
    }
}

/// A day's layout split into its all-day and timed parts.
#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout<'a> {
    pub all_day: Vec<LaidOutEvent<'a>>,
    pub timed: Vec<LaidOutEvent<'a>>,
}

impl<'a> DayLayout<'a> {
    pub fn new(events: &'a [Event], options: &LayoutOptions) -> Self {
        let (all_day, timed) = layout_day(events, options)
            .into_iter()
            .partition(|laid_out| laid_out.is_all_day());
        DayLayout { all_day, timed }
    }

    pub fn is_empty(&self) -> bool {
        self.all_day.is_empty() && self.timed.is_empty()
    }

    /// Widest overlap group of the day.
    pub fn max_columns(&self) -> usize {
        self.timed
            .iter()
            .filter_map(|laid_out| laid_out.slot())
            .map(|slot| slot.total_columns)
            .max()
            .unwrap_or(0)
    }

    /// Hour range covering every timed event, as `(first_hour, end_hour)`.
    pub fn hour_span(&self) -> Option<(u32, u32)> {
        let slots = self.timed.iter().filter_map(|laid_out| laid_out.slot());
        let (start, end) = slots.fold((u32::MAX, 0), |(start, end), slot| {
            (start.min(slot.start_minute), end.max(slot.end_minute))
        });
        (start <= end).then(|| (start / 60, end.div_ceil(60)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_key::DateKey;

    fn day() -> DateKey {
        DateKey::from_ymd(2025, 4, 24).unwrap()
    }

    fn timed(title: &str, start: &str, end: &str) -> Event {
        Event::timed(title, day(), start, Some(end))
    }

    fn slot_of<'a>(layout: &'a [LaidOutEvent<'_>], title: &str) -> &'a TimedSlot {
        layout
            .iter()
            .find(|l| l.event.title == title)
            .and_then(|l| l.slot())
            .unwrap_or_else(|| panic!("no timed slot for {title}"))
    }

    fn packed() -> LayoutOptions {
        LayoutOptions {
            strategy: ColumnStrategy::Packed,
            ..Default::default()
        }
    }

    #[test]
    fn overlapping_pair_splits_columns_and_lone_event_is_full_width() {
        let events = vec![
            timed("A", "10:00", "11:00"),
            timed("B", "10:30", "11:30"),
            timed("C", "12:00", "13:00"),
        ];
        let layout = layout_day_default(&events);

        let a = slot_of(&layout, "A");
        let b = slot_of(&layout, "B");
        assert_eq!((a.column, a.total_columns), (0, 2));
        assert_eq!((b.column, b.total_columns), (1, 2));

        let c = slot_of(&layout, "C");
        assert_eq!((c.column, c.total_columns), (0, 1));
        assert_ne!(c.group, a.group);
    }

    #[test]
    fn all_day_events_stay_out_of_timed_layout() {
        let events = vec![
            timed("Meeting", "10:00", "11:00"),
            Event::all_day("Holiday", day()),
            Event::all_day("Birthday", day()),
        ];
        let layout = layout_day_default(&events);

        assert_eq!(layout.len(), 3);
        assert_eq!(layout[0].placement, Placement::AllDay { row: 0 });
        assert_eq!(layout[0].event.title, "Holiday");
        assert_eq!(layout[0].index, 1);
        assert_eq!(layout[1].placement, Placement::AllDay { row: 1 });

        let meeting = slot_of(&layout, "Meeting");
        assert_eq!((meeting.column, meeting.total_columns), (0, 1));
    }

    #[test]
    fn timed_events_are_sorted_with_stable_ties() {
        let events = vec![
            timed("Late", "15:00", "16:00"),
            timed("First", "9:00 AM", "10:00 AM"),
            timed("Second", "09:00", "09:30"),
        ];
        let layout = layout_day_default(&events);
        let titles: Vec<_> = layout.iter().map(|l| l.event.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second", "Late"]);

        assert_eq!(slot_of(&layout, "First").column, 0);
        assert_eq!(slot_of(&layout, "Second").column, 1);
    }

    #[test]
    fn touching_events_do_not_overlap() {
        let events = vec![timed("A", "9:00", "10:00"), timed("B", "10:00", "11:00")];
        let layout = layout_day_default(&events);
        assert_eq!(slot_of(&layout, "A").total_columns, 1);
        assert_eq!(slot_of(&layout, "B").total_columns, 1);
    }

    #[test]
    fn running_group_end_joins_transitive_overlaps() {
        // C does not overlap B, but starts before A ends
        let events = vec![
            timed("A", "9:00", "12:00"),
            timed("B", "9:30", "10:00"),
            timed("C", "11:00", "11:30"),
        ];
        let layout = layout_day_default(&events);
        for title in ["A", "B", "C"] {
            assert_eq!(slot_of(&layout, title).total_columns, 3, "{title}");
        }

        let layout = layout_day(&events, &packed());
        assert_eq!(slot_of(&layout, "A").column, 0);
        assert_eq!(slot_of(&layout, "B").column, 1);
        assert_eq!(slot_of(&layout, "C").column, 1);
        assert_eq!(slot_of(&layout, "C").total_columns, 2);
    }

    #[test]
    fn chain_overlap_packs_into_two_columns() {
        // A overlaps B, B overlaps C, A does not overlap C
        let events = vec![
            timed("A", "9:00", "10:00"),
            timed("B", "9:30", "10:30"),
            timed("C", "10:00", "11:00"),
        ];

        let sequential = layout_day_default(&events);
        assert_eq!(slot_of(&sequential, "C").column, 2);
        assert_eq!(slot_of(&sequential, "C").total_columns, 3);

        let packed = layout_day(&events, &packed());
        assert_eq!(slot_of(&packed, "A").column, 0);
        assert_eq!(slot_of(&packed, "B").column, 1);
        assert_eq!(slot_of(&packed, "C").column, 0);
        assert!(packed.iter().filter_map(|l| l.slot()).all(|s| s.total_columns == 2));
    }

    #[test]
    fn no_shared_column_overlaps_in_either_strategy() {
        let events = vec![
            timed("A", "8:00", "9:30"),
            timed("B", "8:15", "8:45"),
            timed("C", "8:45", "10:00"),
            timed("D", "9:00", "9:15"),
            timed("E", "9:30", "11:00"),
            timed("F", "13:00", "14:00"),
            timed("G", "13:00", "13:30"),
        ];

        for options in [LayoutOptions::default(), packed()] {
            let layout = layout_day(&events, &options);
            let slots: Vec<_> = layout.iter().filter_map(|l| l.slot()).collect();
            for (i, a) in slots.iter().enumerate() {
                assert!(a.column < a.total_columns);
                for b in &slots[i + 1..] {
                    if a.group == b.group && a.column == b.column {
                        assert!(!a.overlaps(b), "{a:?} collides with {b:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn missing_end_uses_default_duration() {
        let events = vec![Event::timed("Coffee", day(), "3:15 PM", None)];
        let layout = layout_day_default(&events);
        let slot = slot_of(&layout, "Coffee");
        assert_eq!((slot.start_minute, slot.end_minute), (915, 975));

        let options = LayoutOptions {
            default_duration_minutes: 30,
            ..Default::default()
        };
        let layout = layout_day(&events, &options);
        assert_eq!(slot_of(&layout, "Coffee").end_minute, 945);
    }

    #[test]
    fn unparseable_start_falls_back_to_midnight() {
        let events = vec![Event::timed("Mystery", day(), "sometime", None)];
        let layout = layout_day_default(&events);
        let slot = slot_of(&layout, "Mystery");
        assert_eq!((slot.start_minute, slot.end_minute), (0, 60));
    }

    #[test]
    fn backwards_end_gets_default_duration() {
        let events = vec![timed("Backwards", "14:00", "13:00")];
        let layout = layout_day_default(&events);
        assert_eq!(slot_of(&layout, "Backwards").end_minute, 900);
    }

    #[test]
    fn end_is_clamped_to_end_of_day() {
        let events = vec![Event::timed("Late show", day(), "23:30", None)];
        let layout = layout_day_default(&events);
        assert_eq!(slot_of(&layout, "Late show").end_minute, MINUTES_PER_DAY);
    }

    #[test]
    fn huge_default_duration_runs_to_end_of_day() {
        let events = vec![
            Event::timed("Open ended", day(), "22:00", None),
            timed("Broken end", "23:00", "nope"),
        ];
        let options = LayoutOptions {
            default_duration_minutes: u32::MAX,
            ..Default::default()
        };
        let layout = layout_day(&events, &options);

        let open = slot_of(&layout, "Open ended");
        assert_eq!((open.start_minute, open.end_minute), (1320, MINUTES_PER_DAY));
        assert_eq!(open.duration_minutes(), 120);
        assert_eq!(slot_of(&layout, "Broken end").end_minute, MINUTES_PER_DAY);
    }

    #[test]
    fn inverted_slot_has_zero_duration() {
        let slot = TimedSlot {
            start_minute: 600,
            end_minute: 540,
            group: 0,
            column: 0,
            total_columns: 1,
        };
        assert_eq!(slot.duration_minutes(), 0);
    }

    #[test]
    fn rect_uses_fractions_of_width() {
        let slot = TimedSlot {
            start_minute: 90,
            end_minute: 150,
            group: 0,
            column: 1,
            total_columns: 4,
        };
        let rect = slot.rect(40.0);
        assert_eq!(rect.top, 60.0);
        assert_eq!(rect.height, 40.0);
        assert_eq!(rect.left, 0.25);
        assert_eq!(rect.width, 0.25);
    }

    #[test]
    fn day_layout_reports_columns_and_hours() {
        let events = vec![
            Event::all_day("Holiday", day()),
            timed("A", "10:00", "11:00"),
            timed("B", "10:30", "11:30"),
        ];
        let layout = DayLayout::new(&events, &LayoutOptions::default());
        assert_eq!(layout.all_day.len(), 1);
        assert_eq!(layout.timed.len(), 2);
        assert_eq!(layout.max_columns(), 2);
        assert_eq!(layout.hour_span(), Some((10, 12)));

        let empty = DayLayout::new(&[], &LayoutOptions::default());
        assert!(empty.is_empty());
        assert_eq!(empty.hour_span(), None);
    }
}
