//! Attendance record models and the client-side query pipeline that
//! filters, paginates and summarizes them.

pub mod error;
pub mod models;
pub mod query;
pub mod types;
pub mod utils;
pub mod validation;

pub use error::{FormError, ParseEnumError};
pub use models::{AttendanceRecord, AttendanceType, ProjectAssignment, WorkLocation};
pub use query::{
    apply_filters, compute_stats, navigate_month, paginate, AttendanceQuery, Direction,
    FilterState, MonthCursor, PageWindow, PeriodStats, ProjectKey,
};
pub use validation::AttendanceForm;
