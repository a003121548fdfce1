//! Terminal rendering for calendar views.
//!
//! Label colors are hex strings; they are painted as 24-bit color with
//! owo_colors. The day timeline is a fixed-width character grid built from
//! the layout engine's column assignments.

use daybook_core::config::DaybookConfig;
use daybook_core::grid::{DAYS_PER_WEEK, MonthGrid, WEEKDAY_NAMES};
use daybook_core::layout::DayLayout;
use daybook_core::time_of_day::{format_minutes_24h, parse_minutes};
use daybook_core::{CalendarStore, DateKey, Event};
use owo_colors::OwoColorize;

/// Width of one day in the month grid.
const CELL_WIDTH: usize = 6;

/// Character width of the day timeline.
pub const TIMELINE_WIDTH: usize = 48;

/// Minutes covered by one timeline row.
pub const ROW_MINUTES: u32 = 30;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let marker = if self.completed { "✓" } else { "●" };
        let title = if self.completed {
            self.title.strikethrough().dimmed().to_string()
        } else {
            self.title.clone()
        };

        let mut line = format!("{} {:<11} {}", paint(marker, self.color()), time_range(self), title);
        if let Some(location) = &self.location {
            line.push_str(&format!(" {}", format!("@{}", location).dimmed()));
        }
        line
    }
}

/// "09:00-10:00", "09:00", or "all-day". Unparseable times are shown as entered.
fn time_range(event: &Event) -> String {
    let Some(start) = event.start_time() else {
        return "all-day".to_string();
    };

    let show = |t: &str| parse_minutes(t).map(format_minutes_24h).unwrap_or_else(|_| t.to_string());
    match event.end_time.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        Some(end) => format!("{}-{}", show(start), show(end)),
        None => show(start),
    }
}

pub(crate) fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Paint `text` in a hex color; unknown colors leave it plain.
fn paint(text: &str, hex: &str) -> String {
    match parse_hex_color(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b).to_string(),
        None => text.to_string(),
    }
}

/// Center an already styled string of display width `len` in `width` columns.
fn centered(styled: String, len: usize, width: usize) -> String {
    let left = width.saturating_sub(len) / 2;
    let right = width.saturating_sub(len + left);
    format!("{}{}{}", " ".repeat(left), styled, " ".repeat(right))
}

fn style_date(text: &str, date: DateKey, today: DateKey, selected: Option<DateKey>) -> String {
    if selected == Some(date) {
        text.reversed().to_string()
    } else if date == today {
        text.bold().underline().to_string()
    } else {
        text.to_string()
    }
}

fn preview_dots(store: &CalendarStore, date: DateKey, config: &DaybookConfig, max: usize) -> (String, usize) {
    let colors = store.preview_colors(date, config.preview_limit.min(max), &config.default_label_color);
    let dots = colors.iter().map(|c| paint("•", c)).collect();
    (dots, colors.len())
}

/// Month grid with today underlined, the selection reversed, and up to
/// `preview_limit` colored dots under each day.
pub fn render_month(grid: &MonthGrid, store: &CalendarStore, today: DateKey, config: &DaybookConfig) -> String {
    let width = CELL_WIDTH * DAYS_PER_WEEK;
    let mut lines = Vec::new();

    let title = grid
        .days()
        .next()
        .map(|first| first.date().format("%B %Y").to_string())
        .unwrap_or_default();
    lines.push(format!("{:^width$}", title, width = width).bold().to_string());
    lines.push(
        WEEKDAY_NAMES
            .iter()
            .map(|name| format!("{:^width$}", name, width = CELL_WIDTH))
            .collect::<String>()
            .dimmed()
            .to_string(),
    );

    for week in &grid.weeks {
        let mut numbers = String::new();
        let mut dots = String::new();

        for cell in week {
            let Some(date) = *cell else {
                numbers.push_str(&" ".repeat(CELL_WIDTH));
                dots.push_str(&" ".repeat(CELL_WIDTH));
                continue;
            };

            let day = date.day().to_string();
            let styled = style_date(&day, date, today, store.selected_date());
            numbers.push_str(&centered(styled, day.len(), CELL_WIDTH));

            let (preview, count) = preview_dots(store, date, config, CELL_WIDTH - 1);
            dots.push_str(&centered(preview, count, CELL_WIDTH));
        }

        lines.push(numbers);
        lines.push(dots);
    }

    lines.join("\n")
}

/// One line per day of the week: date, dots, and titles in agenda order.
pub fn render_week(
    days: &[DateKey; DAYS_PER_WEEK],
    store: &CalendarStore,
    today: DateKey,
    config: &DaybookConfig,
) -> String {
    let mut lines = vec![format!("Week of {}", days[0].date().format("%b %-d, %Y")).bold().to_string()];

    for &date in days {
        let label = date.date().format("%a %b %e").to_string();
        let (preview, count) = preview_dots(store, date, config, config.preview_limit);
        let padding = " ".repeat(config.preview_limit.saturating_sub(count));

        let titles: Vec<&str> = store.agenda(date).iter().map(|e| e.title.as_str()).collect();
        let summary = if titles.is_empty() {
            "·".dimmed().to_string()
        } else {
            titles.join(", ")
        };

        lines.push(format!(
            "  {}  {}{}  {}",
            style_date(&label, date, today, store.selected_date()),
            preview,
            padding,
            summary
        ));
    }

    lines.join("\n")
}

/// A timed event's stretch of one timeline row, in character columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Position of the event in the day's stored order.
    pub index: usize,
    pub start: usize,
    pub end: usize,
    /// The event starts within this row; its title is drawn here.
    pub starts_here: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineRow {
    pub minute: u32,
    pub segments: Vec<Segment>,
}

/// Slice the timed part of `layout` into `ROW_MINUTES` rows of `width`
/// characters. Each event gets the character span of its column.
pub fn timeline_rows(layout: &DayLayout, width: usize) -> Vec<TimelineRow> {
    let Some((first_hour, end_hour)) = layout.hour_span() else {
        return Vec::new();
    };

    (first_hour * 60..end_hour * 60)
        .step_by(ROW_MINUTES as usize)
        .map(|minute| {
            let row_end = minute + ROW_MINUTES;
            let visible: Vec<_> = layout
                .timed
                .iter()
                .filter_map(|laid_out| laid_out.slot().map(|slot| (laid_out.index, slot)))
                .filter(|(_, slot)| slot.start_minute < row_end && minute < slot.end_minute)
                .collect();

            // Events from back-to-back groups can share a row and a column;
            // the one starting in the row wins.
            let mut segments: Vec<Segment> = Vec::new();
            for starts_here in [true, false] {
                for (index, slot) in &visible {
                    if (slot.start_minute >= minute) != starts_here {
                        continue;
                    }
                    let start = slot.column * width / slot.total_columns;
                    let end = (slot.column + 1) * width / slot.total_columns;
                    if segments.iter().any(|s| s.start < end && start < s.end) {
                        continue;
                    }
                    segments.push(Segment {
                        index: *index,
                        start,
                        end,
                        starts_here,
                    });
                }
            }
            segments.sort_by_key(|s| s.start);

            TimelineRow { minute, segments }
        })
        .collect()
}

fn render_timeline_row(row: &TimelineRow, events: &[Event], config: &DaybookConfig) -> String {
    let label = if row.minute % 60 == 0 {
        format_minutes_24h(row.minute)
    } else {
        " ".repeat(5)
    };

    let mut line = format!("  {} {}", label.dimmed(), "│".dimmed());
    let mut cursor = 0;

    for segment in &row.segments {
        let Some(event) = events.get(segment.index) else {
            continue;
        };
        line.push_str(&" ".repeat(segment.start.saturating_sub(cursor)));

        let span = segment.end - segment.start;
        let body = if segment.starts_here {
            format!("▌{}", event.title)
        } else {
            "▌".to_string()
        };
        let body: String = body.chars().take(span.saturating_sub(1)).collect();
        line.push_str(&paint(
            &format!("{:<width$}", body, width = span),
            event.color_or(&config.default_label_color),
        ));
        cursor = segment.end;
    }

    line.trim_end().to_string()
}

/// Day view: all-day events, the timed events on a timeline, then the list
/// of events with their positions and ids.
pub fn render_day(date: DateKey, events: &[Event], layout: &DayLayout, config: &DaybookConfig) -> String {
    let mut lines = vec![date.date().format("%A, %B %-d %Y").to_string().bold().to_string()];

    if layout.is_empty() {
        lines.push(format!("  {}", "No events".dimmed()));
        return lines.join("\n");
    }

    for laid_out in &layout.all_day {
        let event = laid_out.event;
        lines.push(format!(
            "  {} {} {}",
            "all-day".dimmed(),
            "│".dimmed(),
            paint(&format!("▌{}", event.title), event.color_or(&config.default_label_color))
        ));
    }

    if !layout.timed.is_empty() {
        if !layout.all_day.is_empty() {
            lines.push(String::new());
        }
        lines.extend(
            timeline_rows(layout, TIMELINE_WIDTH)
                .iter()
                .map(|row| render_timeline_row(row, events, config)),
        );
    }

    lines.push(String::new());
    for (index, event) in events.iter().enumerate() {
        lines.push(render_listed(index, event));
    }

    lines.join("\n")
}

/// "#2 ● 09:00-10:00 Standup @Office  1a2b3c4d"
fn render_listed(index: usize, event: &Event) -> String {
    format!(
        "  {} {}  {}",
        format!("#{}", index).dimmed(),
        event.render(),
        event.id.short().dimmed()
    )
}

/// A date as a human label relative to `today` ("Today", "Tomorrow", "Wed Feb 25").
pub fn format_date_label(date: DateKey, today: DateKey) -> String {
    let diff = (date.date() - today.date()).num_days();
    match diff {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.date().format("%a %b %-d").to_string(),
    }
}

/// The day's events in list order (timed by start, then all-day).
pub fn render_agenda(store: &CalendarStore, date: DateKey, today: DateKey) -> String {
    let mut lines = vec![format_date_label(date, today).bold().to_string()];
    let stored = store.events_for_date(date);
    let agenda = store.agenda(date);

    if agenda.is_empty() {
        lines.push(format!("  {}", "No events".dimmed()));
    }

    for event in agenda {
        let index = stored.iter().position(|e| e.id == event.id).unwrap_or_default();
        lines.push(render_listed(index, event));
    }

    lines.join("\n")
}
