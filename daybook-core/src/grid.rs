//! Month and week date grids.
//!
//! Weeks start on Sunday. Month grids pad days outside the month with empty
//! cells; week grids are always seven concrete dates.

use chrono::{Datelike, NaiveDate};

use crate::date_key::DateKey;
use crate::error::{DaybookError, DaybookResult};

pub const DAYS_PER_WEEK: usize = 7;

/// Column headers, Sunday first.
pub const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One row of a month grid. `None` cells fall outside the month.
pub type WeekRow = [Option<DateKey>; DAYS_PER_WEEK];

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<WeekRow>,
}

impl MonthGrid {
    /// All in-month days, in order.
    pub fn days(&self) -> impl Iterator<Item = DateKey> + '_ {
        self.weeks.iter().flatten().filter_map(|cell| *cell)
    }
}

fn first_of_month(year: i32, month: u32) -> DaybookResult<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(DaybookError::InvalidMonth(month));
    }
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DaybookError::InvalidDateKey(format!("{year:04}-{month:02}-01")))
}

/// Number of days in `month` (1-based), from the first of the following month.
pub fn days_in_month(year: i32, month: u32) -> DaybookResult<u32> {
    let first = first_of_month(year, month)?;
    let next_first = first
        .checked_add_months(chrono::Months::new(1))
        .ok_or_else(|| DaybookError::InvalidDateKey(format!("{year:04}-{month:02}")))?;
    let last = next_first
        .pred_opt()
        .ok_or_else(|| DaybookError::InvalidDateKey(format!("{year:04}-{month:02}")))?;
    Ok(last.day())
}

/// Build the Sunday-first grid for `month` (1-based) of `year`.
pub fn month_matrix(year: i32, month: u32) -> DaybookResult<MonthGrid> {
    let first = DateKey::new(first_of_month(year, month)?);
    let num_days = days_in_month(year, month)?;

    let mut cells: Vec<Option<DateKey>> = vec![None; first.weekday_index()];
    cells.extend(first.date().iter_days().take(num_days as usize).map(|d| Some(DateKey::new(d))));
    while cells.len() % DAYS_PER_WEEK != 0 {
        cells.push(None);
    }

    let weeks = cells
        .chunks(DAYS_PER_WEEK)
        .map(|chunk| {
            let mut row: WeekRow = [None; DAYS_PER_WEEK];
            row.copy_from_slice(chunk);
            row
        })
        .collect();

    Ok(MonthGrid { year, month, weeks })
}

/// The Sunday on or before `date`.
pub fn week_start(date: DateKey) -> DaybookResult<DateKey> {
    date.add_days(-(date.weekday_index() as i64))
}

/// The seven dates of the week containing `anchor`, Sunday through Saturday.
///
/// Fails for the partial weeks at either end of the supported date range.
pub fn week_matrix(anchor: DateKey) -> DaybookResult<[DateKey; DAYS_PER_WEEK]> {
    let start = week_start(anchor)?;
    let mut week = [start; DAYS_PER_WEEK];
    for (offset, day) in week.iter_mut().enumerate().skip(1) {
        *day = start.add_days(offset as i64)?;
    }
    Ok(week)
}

/// Month navigation state for the month view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> DaybookResult<Self> {
        first_of_month(year, month)?;
        Ok(MonthCursor { year, month })
    }

    pub fn containing(date: DateKey) -> Self {
        MonthCursor {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            MonthCursor { year: self.year + 1, month: 1 }
        } else {
            MonthCursor { month: self.month + 1, ..self }
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            MonthCursor { year: self.year - 1, month: 12 }
        } else {
            MonthCursor { month: self.month - 1, ..self }
        }
    }

    /// `months` away, negative for earlier months.
    pub fn offset(self, months: i32) -> DaybookResult<Self> {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(months);
        let year = i32::try_from(index.div_euclid(12))
            .map_err(|_| DaybookError::InvalidDateKey(format!("{}-{:02} + {months} months", self.year, self.month)))?;
        let month = index.rem_euclid(12) as u32 + 1;
        MonthCursor::new(year, month)
    }

    pub fn grid(&self) -> DaybookResult<MonthGrid> {
        month_matrix(self.year, self.month)
    }
}

/// Week navigation state for the week view, anchored on the week's Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekCursor {
    start: DateKey,
}

impl WeekCursor {
    pub fn containing(date: DateKey) -> DaybookResult<Self> {
        Ok(WeekCursor { start: week_start(date)? })
    }

    pub fn start(&self) -> DateKey {
        self.start
    }

    pub fn next(self) -> DaybookResult<Self> {
        self.offset(1)
    }

    pub fn prev(self) -> DaybookResult<Self> {
        self.offset(-1)
    }

    /// `weeks` away, negative for earlier weeks.
    pub fn offset(self, weeks: i64) -> DaybookResult<Self> {
        let days = weeks
            .checked_mul(DAYS_PER_WEEK as i64)
            .ok_or(DaybookError::DateOutOfRange {
                date: self.start,
                days: weeks.saturating_mul(DAYS_PER_WEEK as i64),
            })?;
        Ok(WeekCursor { start: self.start.add_days(days)? })
    }

    pub fn days(&self) -> DaybookResult<[DateKey; DAYS_PER_WEEK]> {
        week_matrix(self.start)
    }
}
