//! Opening-hours value types as stored on a gym record.
//!
//! A gym carries an optional `openingHours` object with one entry per
//! weekday. Times stay in their stored `HH:MM` form and are parsed on
//! every evaluation, so a malformed value surfaces where it is used.

use std::fmt;
use std::str::FromStr;

use chrono::{Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Display and storage order of the week.
pub const WEEK_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Wall-clock time of day, stored as minutes since midnight (0..=1440).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        let minutes = hour.checked_mul(60)?.checked_add(minute)?;
        (minute < 60 && minutes <= u32::from(MINUTES_PER_DAY)).then_some(Self(minutes as u16))
    }

    /// Time of day of a wall-clock instant, truncated to the minute.
    pub fn of<T: Timelike>(instant: &T) -> Self {
        Self((instant.hour() * 60 + instant.minute()) as u16)
    }

    /// Parse `H:MM` or `HH:MM`. `24:00` is accepted as the end of the day.
    pub fn parse(value: &str) -> Result<Self, ScheduleError> {
        let (hour, minute) = value
            .split_once(':')
            .ok_or_else(|| ScheduleError::invalid(value))?;

        let well_formed = (1..=2).contains(&hour.len())
            && minute.len() == 2
            && hour.bytes().all(|b| b.is_ascii_digit())
            && minute.bytes().all(|b| b.is_ascii_digit());
        if !well_formed {
            return Err(ScheduleError::invalid(value));
        }

        let hour: u32 = hour.parse().map_err(|_| ScheduleError::invalid(value))?;
        let minute: u32 = minute.parse().map_err(|_| ScheduleError::invalid(value))?;

        Self::from_hm(hour, minute).ok_or_else(|| ScheduleError::invalid(value))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl FromStr for ClockTime {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Hours for a single day.
///
/// When `closed` is set, `open` and `close` are kept for round-tripping
/// but never consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: String,
    pub close: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub closed: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl DayHours {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            closed: false,
        }
    }

    /// A day the gym does not open at all.
    pub fn closed() -> Self {
        Self {
            open: "00:00".to_string(),
            close: "00:00".to_string(),
            closed: true,
        }
    }

    /// Parsed `(open, close)` pair. Both sides are always parsed.
    pub fn window(&self) -> Result<(ClockTime, ClockTime), ScheduleError> {
        let open = ClockTime::parse(&self.open)?;
        let close = ClockTime::parse(&self.close)?;
        Ok((open, close))
    }

    /// Half-open membership test `open <= time < close`.
    ///
    /// A close at or before the open time never contains anything; there is
    /// no wrap past midnight.
    pub fn contains(&self, time: ClockTime) -> Result<bool, ScheduleError> {
        if self.closed {
            return Ok(false);
        }
        let (open, close) = self.window()?;
        Ok(open <= time && time < close)
    }
}

/// One [`DayHours`] per weekday, Monday first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredWeek", into = "StoredWeek")]
pub struct WeeklySchedule {
    days: [DayHours; 7],
}

impl WeeklySchedule {
    pub fn new(days: [DayHours; 7]) -> Self {
        Self { days }
    }

    /// Same hours every day of the week.
    pub fn uniform(hours: DayHours) -> Self {
        Self {
            days: std::array::from_fn(|_| hours.clone()),
        }
    }

    /// Replace the hours of a single day.
    pub fn with_day(mut self, day: Weekday, hours: DayHours) -> Self {
        self.days[day.num_days_from_monday() as usize] = hours;
        self
    }

    pub fn get(&self, day: Weekday) -> &DayHours {
        &self.days[day.num_days_from_monday() as usize]
    }

    /// Days in Monday to Sunday order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DayHours)> {
        WEEK_ORDER.into_iter().zip(self.days.iter())
    }
}

/// Stored shape of `openingHours`: one lowercase key per weekday.
///
/// Decoding never fails on a missing day; the gap is reported as
/// [`ScheduleError::MissingWeekdayEntry`] when the week is evaluated, so a
/// single incomplete record cannot spoil a whole batch. Unknown keys are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredWeek {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<DayHours>,
}

impl StoredWeek {
    /// Complete week, or the first missing weekday.
    pub fn to_schedule(&self) -> Result<WeeklySchedule, ScheduleError> {
        WeeklySchedule::try_from(self.clone())
    }
}

impl TryFrom<StoredWeek> for WeeklySchedule {
    type Error = ScheduleError;

    fn try_from(wire: StoredWeek) -> Result<Self, Self::Error> {
        fn require(day: Weekday, entry: Option<DayHours>) -> Result<DayHours, ScheduleError> {
            entry.ok_or(ScheduleError::MissingWeekdayEntry(day))
        }

        Ok(Self {
            days: [
                require(Weekday::Mon, wire.monday)?,
                require(Weekday::Tue, wire.tuesday)?,
                require(Weekday::Wed, wire.wednesday)?,
                require(Weekday::Thu, wire.thursday)?,
                require(Weekday::Fri, wire.friday)?,
                require(Weekday::Sat, wire.saturday)?,
                require(Weekday::Sun, wire.sunday)?,
            ],
        })
    }
}

impl From<WeeklySchedule> for StoredWeek {
    fn from(schedule: WeeklySchedule) -> Self {
        let [monday, tuesday, wednesday, thursday, friday, saturday, sunday] = schedule.days;
        Self {
            monday: Some(monday),
            tuesday: Some(tuesday),
            wednesday: Some(wednesday),
            thursday: Some(thursday),
            friday: Some(friday),
            saturday: Some(saturday),
            sunday: Some(sunday),
        }
    }
}
