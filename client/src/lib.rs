//! HTTP client, configuration and fetch layer for attendance listings.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

pub use api::ApiClient;
pub use config::Config;
pub use error::ClientError;
pub use state::{AttendanceBoard, AttendanceSource};
