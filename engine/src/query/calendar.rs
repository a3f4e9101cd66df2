use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;

use super::stats::DayBucket;
use crate::utils::time::month_bounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// A calendar month. Months are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn containing(day: NaiveDate) -> Self {
        Self {
            year: day.year(),
            month: day.month(),
        }
    }

    /// Parses the `YYYY-MM` form used in query strings.
    pub fn parse(value: &str) -> Option<Self> {
        let (year, month) = value.trim().split_once('-')?;
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    pub fn step(self, direction: Direction) -> Self {
        let (month, year) = navigate_month(self.month, self.year, direction);
        Self { year, month }
    }

    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        month_bounds(self.year, self.month)
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Moves one month back or forward, rolling the year at the edges. The
/// year saturates at the `i32` range instead of overflowing.
pub fn navigate_month(month: u32, year: i32, direction: Direction) -> (u32, i32) {
    match direction {
        Direction::Prev if month <= 1 => (12, year.saturating_sub(1)),
        Direction::Prev => (month - 1, year),
        Direction::Next if month >= 12 => (1, year.saturating_add(1)),
        Direction::Next => (month + 1, year),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for filler days borrowed from the neighbouring months.
    pub in_month: bool,
    pub bucket: Option<DayBucket>,
}

/// Lays the month out as Sunday-first weeks of seven days.
pub fn month_grid(
    cursor: MonthCursor,
    buckets: &BTreeMap<NaiveDate, DayBucket>,
) -> Vec<[CalendarDay; 7]> {
    let Some((first, last)) = cursor.bounds() else {
        return Vec::new();
    };
    let lead = first.weekday().num_days_from_sunday() as i64;
    let trail = 6 - last.weekday().num_days_from_sunday() as i64;
    let start = first - Duration::days(lead);
    let total = (last - first).num_days() + 1 + lead + trail;

    let days: Vec<CalendarDay> = (0..total)
        .map(|offset| {
            let date = start + Duration::days(offset);
            let in_month = date >= first && date <= last;
            CalendarDay {
                date,
                in_month,
                bucket: in_month.then(|| buckets.get(&date).copied()).flatten(),
            }
        })
        .collect();

    days.chunks_exact(7)
        .map(|week| [week[0], week[1], week[2], week[3], week[4], week[5], week[6]])
        .collect()
}
