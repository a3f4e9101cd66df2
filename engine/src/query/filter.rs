use chrono::{Datelike, NaiveDate};

use crate::models::{AttendanceRecord, AttendanceType};
use crate::types::{ProjectAssignmentId, ProjectId};

/// Stable key for the project dimension. Display names are never used as
/// keys: two projects may share one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectKey {
    Assignment(ProjectAssignmentId),
    Project(ProjectId),
}

impl ProjectKey {
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        match self {
            ProjectKey::Assignment(id) => record.project_assignment_id == *id,
            ProjectKey::Project(id) => record.project_id.as_ref() == Some(id),
        }
    }
}

/// Active filter dimensions. `None` means no constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub attendance_type: Option<AttendanceType>,
    pub project: Option<ProjectKey>,
    pub specific_date: Option<NaiveDate>,
}

impl FilterState {
    pub fn for_month(year: i32, month: u32) -> Self {
        Self {
            month: Some(month),
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.month.is_none()
            && self.year.is_none()
            && self.attendance_type.is_none()
            && self.project.is_none()
            && self.specific_date.is_none()
    }

    /// Any active dimension excludes records whose date does not parse.
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        if self.is_empty() {
            return true;
        }
        let Some(day) = record.work_day() else {
            return false;
        };
        if let Some(kind) = self.attendance_type {
            if record.attendance_type != kind {
                return false;
            }
        }
        if let Some(project) = &self.project {
            if !project.matches(record) {
                return false;
            }
        }
        self.month.map_or(true, |m| day.month() == m)
            && self.year.map_or(true, |y| day.year() == y)
            && self.specific_date.map_or(true, |d| day == d)
    }
}

/// Keeps the records satisfying every active dimension of `filter`, in
/// source order. The output borrows the input elements.
pub fn apply_filters<'a, I>(records: I, filter: &FilterState) -> Vec<&'a AttendanceRecord>
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    if filter.is_empty() {
        return records.into_iter().collect();
    }
    records
        .into_iter()
        .filter(|record| filter.matches(record))
        .collect()
}
