//! Month view and the fixed 42-cell month grid.

use std::fmt;

use chrono::{Datelike, Days, Local, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CalError, CalResult};

/// Six full weeks.
pub const GRID_CELLS: usize = 42;

/// Most days a grid can show before the first of its month.
const MAX_LEADING_DAYS: u64 = 6;

/// Which weekday the first grid column falls on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Column headers in display order.
    pub fn day_names(self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        }
    }

    /// Days between `date`'s weekday and the start of its week.
    fn offset_of(self, date: NaiveDate) -> u64 {
        let from = date.weekday().num_days_from_monday() as i64;
        let start = self.weekday().num_days_from_monday() as i64;
        (from - start).rem_euclid(7) as u64
    }
}

/// The month currently displayed. Month is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthView {
    first_day: NaiveDate,
}

impl MonthView {
    pub fn new(year: i32, month: u32) -> CalResult<Self> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            CalError::Validation(format!("Invalid month {}-{:02}", year, month))
        })?;
        Self::starting(first_day)
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> CalResult<Self> {
        Self::starting(date.with_day(1).unwrap_or(date))
    }

    pub fn current() -> Self {
        let today = Local::now().date_naive();
        MonthView {
            first_day: today.with_day(1).unwrap_or(today),
        }
    }

    fn starting(first_day: NaiveDate) -> CalResult<Self> {
        if !grid_fits(first_day) {
            return Err(CalError::Validation(format!(
                "Month {} is outside the supported date range",
                first_day.format("%Y-%m")
            )));
        }
        Ok(MonthView { first_day })
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Stays put on the last month whose grid fits in the date range.
    pub fn next(&self) -> Self {
        MonthView {
            first_day: self
                .first_day
                .checked_add_months(Months::new(1))
                .filter(|first| grid_fits(*first))
                .unwrap_or(self.first_day),
        }
    }

    /// Stays put on the first month whose grid fits in the date range.
    pub fn previous(&self) -> Self {
        MonthView {
            first_day: self
                .first_day
                .checked_sub_months(Months::new(1))
                .filter(|first| grid_fits(*first))
                .unwrap_or(self.first_day),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl fmt::Display for MonthView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day.format("%B %Y"))
    }
}

/// Whether every 42-day window around `first_day` exists, whatever the week start.
fn grid_fits(first_day: NaiveDate) -> bool {
    first_day.checked_sub_days(Days::new(MAX_LEADING_DAYS)).is_some()
        && first_day
            .checked_add_days(Days::new(GRID_CELLS as u64 - 1))
            .is_some()
}

/// One day in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
}

/// Grid for `view`, with `is_today` computed against the local wall clock.
pub fn generate_grid(view: MonthView, week_start: WeekStart) -> Vec<CalendarCell> {
    generate_grid_at(view, week_start, Local::now().date_naive())
}

/// Grid for `view` as seen on `today`.
///
/// Always 42 consecutive days, starting on the most recent `week_start`
/// weekday on or before the first of the month.
pub fn generate_grid_at(view: MonthView, week_start: WeekStart, today: NaiveDate) -> Vec<CalendarCell> {
    let first = view.first_day();
    // MonthView only holds months whose whole window fits
    let start = first
        .checked_sub_days(Days::new(week_start.offset_of(first)))
        .unwrap_or(first);

    start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| CalendarCell {
            date,
            in_current_month: view.contains(date),
            is_today: date == today,
        })
        .collect()
}
