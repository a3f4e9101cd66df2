use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{AttendanceRecord, AttendanceType};

/// All records sharing one calendar day, collapsed to flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub has_work: bool,
    pub has_leave: bool,
    pub has_absent: bool,
    pub has_holiday: bool,
}

impl DayBucket {
    fn absorb(&mut self, kind: AttendanceType) {
        match kind {
            AttendanceType::Present => self.has_work = true,
            AttendanceType::PaidLeave => self.has_leave = true,
            AttendanceType::Absent => self.has_absent = true,
            AttendanceType::LegalHoliday => self.has_holiday = true,
        }
    }

    /// The single classification used for counting: work beats leave,
    /// leave beats absence. Holiday-only days have none.
    pub fn classification(&self) -> Option<AttendanceType> {
        if self.has_work {
            Some(AttendanceType::Present)
        } else if self.has_leave {
            Some(AttendanceType::PaidLeave)
        } else if self.has_absent {
            Some(AttendanceType::Absent)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    pub work_days: usize,
    pub leave_days: usize,
    pub absent_days: usize,
}

/// Groups records by UTC calendar day. Undated records are skipped.
pub fn day_buckets<'a, I>(records: I) -> BTreeMap<NaiveDate, DayBucket>
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    for record in records {
        if let Some(day) = record.work_day() {
            buckets.entry(day).or_default().absorb(record.attendance_type);
        }
    }
    buckets
}

pub fn compute_stats<'a, I>(records: I) -> PeriodStats
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    day_buckets(records)
        .values()
        .fold(PeriodStats::default(), |mut stats, bucket| {
            match bucket.classification() {
                Some(AttendanceType::Present) => stats.work_days += 1,
                Some(AttendanceType::PaidLeave) => stats.leave_days += 1,
                Some(AttendanceType::Absent) => stats.absent_days += 1,
                Some(AttendanceType::LegalHoliday) | None => {}
            }
            stats
        })
}

/// Sum of worked hours over PRESENT records that carry both times.
pub fn total_worked_hours<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    records
        .into_iter()
        .filter_map(AttendanceRecord::worked_hours)
        .sum()
}
