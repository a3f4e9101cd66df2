//! Rules shared by attendance entry payloads.

use chrono::NaiveTime;
use validator::ValidationError;

use crate::models::WorkLocation;

/// Validates break hours.
///
/// Requirements:
/// - Finite and not negative
pub fn validate_break_hours(hours: f64) -> Result<(), ValidationError> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(ValidationError::new("break_hours_invalid"));
    }
    Ok(())
}

/// Validates the working-day details of a PRESENT entry.
///
/// Requirements:
/// - Location, start time and end time are all present
/// - End time is after start time
/// - Breaks do not exceed the start/end span
pub fn validate_present_details(
    location: Option<WorkLocation>,
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
    break_hours: f64,
) -> Result<(), ValidationError> {
    if location.is_none() {
        return Err(ValidationError::new("work_location_required"));
    }
    let (Some(start), Some(end)) = (start, end) else {
        return Err(ValidationError::new("work_times_required"));
    };
    if end <= start {
        return Err(ValidationError::new("end_time_not_after_start_time"));
    }
    let span_hours = (end - start).num_minutes() as f64 / 60.0;
    if break_hours > span_hours {
        return Err(ValidationError::new("break_hours_exceed_span"));
    }
    Ok(())
}

/// Validates that a non-working entry carries no working-day details.
pub fn validate_no_work_details(
    location: Option<WorkLocation>,
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
    break_hours: f64,
) -> Result<(), ValidationError> {
    if location.is_some() || start.is_some() || end.is_some() || break_hours != 0.0 {
        return Err(ValidationError::new("work_details_not_allowed"));
    }
    Ok(())
}
