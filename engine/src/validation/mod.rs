//! Attendance entry form validation.
//!
//! The backend is authoritative; these checks catch the mistakes the entry
//! form can catch before a round-trip.

pub mod rules;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
pub use validator::Validate;
use validator::ValidationError;

use crate::error::FormError;
use crate::models::{AttendanceRecord, AttendanceType, WorkLocation};
use crate::types::{EngineerId, ProjectAssignmentId};
use crate::utils::time::optional_time;

/// Create/update payload for one attendance entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_attendance_form"))]
pub struct AttendanceForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engineer_id: Option<EngineerId>,
    pub project_assignment_id: ProjectAssignmentId,
    pub work_date: NaiveDate,
    pub attendance_type: AttendanceType,
    #[serde(default)]
    pub work_location: Option<WorkLocation>,
    #[serde(default, with = "optional_time")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "optional_time")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub break_hours: f64,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub work_description: Option<String>,
}

fn validate_attendance_form(form: &AttendanceForm) -> Result<(), ValidationError> {
    rules::validate_break_hours(form.break_hours)?;
    match form.attendance_type {
        AttendanceType::Present => rules::validate_present_details(
            form.work_location,
            form.start_time,
            form.end_time,
            form.break_hours,
        ),
        _ => rules::validate_no_work_details(
            form.work_location,
            form.start_time,
            form.end_time,
            form.break_hours,
        ),
    }
}

impl AttendanceForm {
    pub fn new(
        project_assignment_id: ProjectAssignmentId,
        work_date: NaiveDate,
        attendance_type: AttendanceType,
    ) -> Self {
        Self {
            engineer_id: None,
            project_assignment_id,
            work_date,
            attendance_type,
            work_location: None,
            start_time: None,
            end_time: None,
            break_hours: 0.0,
            work_description: None,
        }
    }

    /// Prefills an edit form. `None` when the record's date does not parse.
    pub fn from_record(record: &AttendanceRecord) -> Option<Self> {
        Some(Self {
            engineer_id: record.engineer_id.clone(),
            project_assignment_id: record.project_assignment_id.clone(),
            work_date: record.work_day()?,
            attendance_type: record.attendance_type,
            work_location: record.work_location,
            start_time: record.start_time,
            end_time: record.end_time,
            break_hours: record.break_hours,
            work_description: record.work_description.clone(),
        })
    }

    pub fn with_work_details(
        mut self,
        location: WorkLocation,
        start: NaiveTime,
        end: NaiveTime,
        break_hours: f64,
    ) -> Self {
        self.work_location = Some(location);
        self.start_time = Some(start);
        self.end_time = Some(end);
        self.break_hours = break_hours;
        self
    }

    /// Switches the entry type. Leaving PRESENT drops the working-day
    /// details, which only PRESENT entries may carry.
    pub fn set_attendance_type(&mut self, kind: AttendanceType) {
        self.attendance_type = kind;
        if kind != AttendanceType::Present {
            self.work_location = None;
            self.start_time = None;
            self.end_time = None;
            self.break_hours = 0.0;
        }
    }

    /// Trims the description (blank becomes `None`) and validates.
    pub fn validated(mut self) -> Result<Self, FormError> {
        self.work_description = self
            .work_description
            .take()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn present_form() -> AttendanceForm {
        AttendanceForm::new("pa-1".into(), day(), AttendanceType::Present).with_work_details(
            WorkLocation::ClientSite,
            t(9),
            t(18),
            1.0,
        )
    }

    #[test]
    fn valid_present_form_passes() {
        assert!(present_form().validated().is_ok());
    }

    #[test]
    fn present_form_without_times_fails() {
        let form = AttendanceForm::new("pa-1".into(), day(), AttendanceType::Present);
        let err = form.validated().unwrap_err();
        assert_eq!(err.messages(), &["__all__: work_location_required".to_string()]);
    }

    #[test]
    fn switching_to_leave_clears_work_details() {
        let mut form = present_form();
        form.set_attendance_type(AttendanceType::PaidLeave);
        assert!(form.start_time.is_none());
        assert_eq!(form.break_hours, 0.0);
        assert!(form.validated().is_ok());
    }

    #[test]
    fn leave_with_times_fails() {
        let mut form = present_form();
        form.attendance_type = AttendanceType::Absent;
        assert!(form.validated().is_err());
    }

    #[test]
    fn long_description_fails_length_rule() {
        let mut form = present_form();
        form.work_description = Some("x".repeat(1001));
        let err = form.validated().unwrap_err();
        assert!(err
            .messages()
            .contains(&"work_description: length".to_string()));
    }

    #[test]
    fn blank_description_is_dropped() {
        let mut form = present_form();
        form.work_description = Some("   ".into());
        assert_eq!(form.validated().unwrap().work_description, None);
    }

    #[test]
    fn serializes_camel_case_with_clock_times() {
        let value = serde_json::to_value(present_form()).unwrap();
        assert_eq!(value["workDate"], "2024-03-05");
        assert_eq!(value["attendanceType"], "PRESENT");
        assert_eq!(value["workLocation"], "CLIENT_SITE");
        assert_eq!(value["startTime"], "09:00");
        assert_eq!(value["projectAssignmentId"], "pa-1");
        assert!(value.get("engineerId").is_none());
    }

    #[test]
    fn from_record_round_trips_fields() {
        let mut record =
            AttendanceRecord::new("att-1", "2024-03-05T00:00:00Z", AttendanceType::Present, "pa-1");
        record.work_location = Some(WorkLocation::Home);
        record.start_time = Some(t(10));
        record.end_time = Some(t(19));
        let form = AttendanceForm::from_record(&record).unwrap();
        assert_eq!(form.work_date, day());
        assert_eq!(form.work_location, Some(WorkLocation::Home));

        record.work_date = "bogus".into();
        assert!(AttendanceForm::from_record(&record).is_none());
    }
}
