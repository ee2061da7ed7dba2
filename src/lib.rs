//! Gym Spotter Library
//!
//! Opening-hours evaluation for the gym directory, plus the read-only
//! pieces around it: gym records, the backend client, and configuration.

pub mod api;
pub mod config;
pub mod directory;
pub mod error;
pub mod gym;
pub mod hours;
pub mod locale;
pub mod schedule;
pub mod traits;

// Re-export commonly used types
pub use api::{GymApiClient, load_gyms_from_file};
pub use config::AppConfig;
pub use directory::{GymDirectory, GymFilter, GymListing};
pub use error::ScheduleError;
pub use gym::{Equipment, Gym};
pub use hours::{ClockTime, DayHours, StoredWeek, WEEK_ORDER, WeeklySchedule};
pub use locale::Locale;
pub use schedule::{
    DisplayRow, OpenStatus, RowHours, current_weekday, format_day_schedule, is_open_now,
    open_status, weekly_rows,
};
pub use traits::{Clock, MockClock, SystemClock};
