pub mod assignment;
pub mod attendance;

pub use assignment::ProjectAssignment;
pub use attendance::{AttendanceRecord, AttendanceType, WorkLocation};
