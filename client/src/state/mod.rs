pub mod attendance;

pub use attendance::{AttendanceBoard, AttendanceSource, FetchTicket};
