use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

use crate::error::ParseEnumError;
use crate::types::{AttendanceId, EngineerId, ProjectAssignmentId, ProjectId};
use crate::utils::time::{optional_time, parse_date_value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceType {
    Present,
    PaidLeave,
    Absent,
    LegalHoliday,
}

impl AttendanceType {
    pub const ALL: [AttendanceType; 4] = [
        AttendanceType::Present,
        AttendanceType::PaidLeave,
        AttendanceType::Absent,
        AttendanceType::LegalHoliday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceType::Present => "PRESENT",
            AttendanceType::PaidLeave => "PAID_LEAVE",
            AttendanceType::Absent => "ABSENT",
            AttendanceType::LegalHoliday => "LEGAL_HOLIDAY",
        }
    }
}

impl fmt::Display for AttendanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AttendanceType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttendanceType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "attendance type",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkLocation {
    ClientSite,
    Home,
    Office,
}

impl WorkLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkLocation::ClientSite => "CLIENT_SITE",
            WorkLocation::Home => "HOME",
            WorkLocation::Office => "OFFICE",
        }
    }
}

impl fmt::Display for WorkLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for WorkLocation {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [WorkLocation::ClientSite, WorkLocation::Home, WorkLocation::Office]
            .into_iter()
            .find(|loc| loc.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "work location",
                value: s.to_string(),
            })
    }
}

/// One day's reported status for one engineer on one project assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engineer_id: Option<EngineerId>,
    /// Raw wire value; see [`AttendanceRecord::work_day`].
    pub work_date: String,
    pub attendance_type: AttendanceType,
    #[serde(default)]
    pub work_location: Option<WorkLocation>,
    #[serde(default, with = "optional_time")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "optional_time")]
    pub end_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "lenient_hours")]
    pub break_hours: f64,
    #[serde(default)]
    pub work_description: Option<String>,
    pub project_assignment_id: ProjectAssignmentId,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
}

impl AttendanceRecord {
    pub fn new(
        id: impl Into<AttendanceId>,
        work_date: impl Into<String>,
        attendance_type: AttendanceType,
        project_assignment_id: impl Into<ProjectAssignmentId>,
    ) -> Self {
        Self {
            id: id.into(),
            engineer_id: None,
            work_date: work_date.into(),
            attendance_type,
            work_location: None,
            start_time: None,
            end_time: None,
            break_hours: 0.0,
            work_description: None,
            project_assignment_id: project_assignment_id.into(),
            project_id: None,
            project_name: None,
            client_name: None,
        }
    }

    /// Calendar day of the record in UTC, or `None` when the wire value
    /// does not parse.
    pub fn work_day(&self) -> Option<NaiveDate> {
        parse_date_value(&self.work_date)
    }

    pub fn is_present(&self) -> bool {
        self.attendance_type == AttendanceType::Present
    }

    /// Hours between start and end minus breaks, for PRESENT records only.
    pub fn worked_hours(&self) -> Option<f64> {
        if !self.is_present() {
            return None;
        }
        let (start, end) = (self.start_time?, self.end_time?);
        let span = (end - start).num_minutes() as f64 / 60.0;
        Some((span - self.break_hours).max(0.0))
    }
}

// Decimal columns arrive as numbers or strings depending on the serializer.
fn lenient_hours<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Hours {
        Number(f64),
        Text(String),
    }

    match Option::<Hours>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Hours::Number(n)) => Ok(n),
        Some(Hours::Text(s)) if s.trim().is_empty() => Ok(0.0),
        Some(Hours::Text(s)) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid hours: {s}"))),
    }
}
