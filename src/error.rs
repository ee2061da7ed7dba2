use chrono::Weekday;
use thiserror::Error;

/// Data-integrity errors raised while evaluating opening hours.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("invalid time of day {value:?}, expected HH:MM")]
    InvalidScheduleFormat { value: String },
    #[error("opening hours have no entry for {0}")]
    MissingWeekdayEntry(Weekday),
}

impl ScheduleError {
    pub(crate) fn invalid(value: &str) -> Self {
        Self::InvalidScheduleFormat {
            value: value.to_string(),
        }
    }
}
