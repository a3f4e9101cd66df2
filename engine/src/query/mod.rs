//! Client-side attendance query pipeline.
//!
//! Records are fetched wholesale for a scope; everything here derives views
//! from that in-memory set. All functions are pure and may be called in any
//! order. [`AttendanceQuery`] is the only stateful piece and is owned by the
//! view that renders it.

pub mod calendar;
pub mod filter;
pub mod pagination;
pub mod state;
pub mod stats;

pub use calendar::{month_grid, navigate_month, CalendarDay, Direction, MonthCursor};
pub use filter::{apply_filters, FilterState, ProjectKey};
pub use pagination::{clamp_page, paginate, PageWindow, DEFAULT_PAGE_SIZE};
pub use state::{AttendanceQuery, QueryView};
pub use stats::{compute_stats, day_buckets, total_worked_hours, DayBucket, PeriodStats};
