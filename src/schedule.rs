use std::fmt;

use chrono::{Datelike, Timelike, Weekday};

use crate::error::ScheduleError;
use crate::hours::{ClockTime, DayHours, WeeklySchedule};
use crate::locale::Locale;

/// Weekday of the given local wall-clock instant.
///
/// Depends only on the calendar date, never on the time of day.
pub fn current_weekday<T: Datelike>(now: &T) -> Weekday {
    now.weekday()
}

/// Check if a gym is open at the given local wall-clock instant.
///
/// No schedule means the gym never closes. Otherwise today's window is the
/// half-open range `open <= now < close`, compared in minutes since midnight
/// with no wrap past midnight.
pub fn is_open_now<T>(schedule: Option<&WeeklySchedule>, now: &T) -> Result<bool, ScheduleError>
where
    T: Datelike + Timelike,
{
    let Some(schedule) = schedule else {
        return Ok(true);
    };

    let today = schedule.get(current_weekday(now));
    today.contains(ClockTime::of(now))
}

/// Badge-level status of a gym.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenStatus {
    /// No opening hours recorded.
    AlwaysOpen,
    Open,
    Closed,
}

impl OpenStatus {
    pub fn is_open(self) -> bool {
        !matches!(self, OpenStatus::Closed)
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match self {
            OpenStatus::AlwaysOpen => locale.open_24_7(),
            OpenStatus::Open => locale.open(),
            OpenStatus::Closed => locale.closed(),
        }
    }
}

pub fn open_status<T>(schedule: Option<&WeeklySchedule>, now: &T) -> Result<OpenStatus, ScheduleError>
where
    T: Datelike + Timelike,
{
    match schedule {
        None => Ok(OpenStatus::AlwaysOpen),
        Some(_) if is_open_now(schedule, now)? => Ok(OpenStatus::Open),
        Some(_) => Ok(OpenStatus::Closed),
    }
}

/// Time column of a schedule row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowHours {
    Closed,
    Range { open: String, close: String },
}

/// One rendered line of the weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub weekday: Weekday,
    pub label: &'static str,
    pub hours: RowHours,
    closed_marker: &'static str,
    /// Localized "today" marker, set on exactly one row of a week.
    pub today: Option<&'static str>,
}

impl DisplayRow {
    pub fn is_today(&self) -> bool {
        self.today.is_some()
    }

    /// Time column text: `"06:00 - 22:00"` or the closed marker.
    pub fn hours_text(&self) -> String {
        match &self.hours {
            RowHours::Closed => self.closed_marker.to_string(),
            RowHours::Range { open, close } => format!("{open} - {close}"),
        }
    }
}

impl fmt::Display for DisplayRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<10} {:<15}", self.label, self.hours_text())?;
        if let Some(marker) = self.today {
            write!(f, " {marker}")?;
        }
        Ok(())
    }
}

/// Project a day's hours into a display row. Pure formatting, the stored
/// strings are shown as-is.
pub fn format_day_schedule(day: Weekday, hours: &DayHours, is_today: bool, locale: Locale) -> DisplayRow {
    let row_hours = if hours.closed {
        RowHours::Closed
    } else {
        RowHours::Range {
            open: hours.open.clone(),
            close: hours.close.clone(),
        }
    };

    DisplayRow {
        weekday: day,
        label: locale.weekday(day),
        hours: row_hours,
        closed_marker: locale.closed(),
        today: is_today.then(|| locale.today()),
    }
}

/// All seven rows, Monday to Sunday, with today's row marked.
pub fn weekly_rows<T: Datelike>(schedule: &WeeklySchedule, now: &T, locale: Locale) -> Vec<DisplayRow> {
    let today = current_weekday(now);

    schedule
        .iter()
        .map(|(day, hours)| format_day_schedule(day, hours, day == today, locale))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};

    use super::*;
    use crate::hours::WEEK_ORDER;

    fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn gym_schedule() -> WeeklySchedule {
        WeeklySchedule::uniform(DayHours::new("06:00", "22:00"))
    }

    // ==================== current_weekday Tests ====================

    #[test]
    fn test_current_weekday_known_dates() {
        // 2024-02-12 was a Monday
        assert_eq!(current_weekday(&at(2024, 2, 12, 10, 0)), Weekday::Mon);
        assert_eq!(current_weekday(&at(2024, 2, 17, 10, 0)), Weekday::Sat);
        assert_eq!(current_weekday(&at(2024, 2, 18, 10, 0)), Weekday::Sun);
    }

    #[test]
    fn test_current_weekday_ignores_time_of_day() {
        assert_eq!(
            current_weekday(&at(2024, 2, 14, 0, 0)),
            current_weekday(&at(2024, 2, 14, 23, 59))
        );
    }

    #[test]
    fn test_current_weekday_accepts_local_datetime() {
        let now = Local.with_ymd_and_hms(2024, 6, 12, 12, 0, 0).unwrap();
        assert_eq!(current_weekday(&now), Weekday::Wed);
    }

    // ==================== is_open_now Tests ====================

    #[test]
    fn test_no_schedule_is_always_open() {
        assert_eq!(is_open_now(None, &at(2024, 2, 12, 3, 0)), Ok(true));
        assert_eq!(is_open_now(None, &at(2024, 2, 18, 23, 59)), Ok(true));
    }

    #[test]
    fn test_open_at_opening_minute() {
        let schedule = gym_schedule();
        assert_eq!(is_open_now(Some(&schedule), &at(2024, 2, 12, 6, 0)), Ok(true));
    }

    #[test]
    fn test_open_one_minute_before_close() {
        let schedule = gym_schedule();
        assert_eq!(is_open_now(Some(&schedule), &at(2024, 2, 12, 21, 59)), Ok(true));
    }

    #[test]
    fn test_closed_one_minute_before_opening() {
        let schedule = gym_schedule();
        assert_eq!(is_open_now(Some(&schedule), &at(2024, 2, 12, 5, 59)), Ok(false));
    }

    #[test]
    fn test_closed_at_closing_minute() {
        let schedule = gym_schedule();
        assert_eq!(is_open_now(Some(&schedule), &at(2024, 2, 12, 22, 0)), Ok(false));
    }

    #[test]
    fn test_seconds_do_not_matter() {
        let schedule = gym_schedule();
        let now = NaiveDate::from_ymd_opt(2024, 2, 12)
            .unwrap()
            .and_hms_opt(21, 59, 59)
            .unwrap();
        assert_eq!(is_open_now(Some(&schedule), &now), Ok(true));
    }

    #[test]
    fn test_closed_day_ignores_time() {
        let schedule = gym_schedule().with_day(Weekday::Sun, DayHours::closed());
        for hour in 0..24 {
            assert_eq!(is_open_now(Some(&schedule), &at(2024, 2, 18, hour, 30)), Ok(false));
        }
    }

    #[test]
    fn test_monday_only_scenario() {
        let schedule = WeeklySchedule::uniform(DayHours::closed())
            .with_day(Weekday::Mon, DayHours::new("06:00", "23:00"));

        // Monday noon
        assert_eq!(is_open_now(Some(&schedule), &at(2024, 2, 12, 12, 0)), Ok(true));
        // Tuesday noon
        assert_eq!(is_open_now(Some(&schedule), &at(2024, 2, 13, 12, 0)), Ok(false));
    }

    #[test]
    fn test_close_before_open_is_never_open() {
        // Overnight hours are not wrapped past midnight.
        let schedule = WeeklySchedule::uniform(DayHours::new("10:00", "09:00"));
        for hour in 0..24 {
            for minute in [0, 30, 59] {
                assert_eq!(is_open_now(Some(&schedule), &at(2024, 2, 12, hour, minute)), Ok(false));
            }
        }
    }

    #[test]
    fn test_close_at_midnight_covers_last_minute() {
        let schedule = WeeklySchedule::uniform(DayHours::new("00:00", "24:00"));
        assert_eq!(is_open_now(Some(&schedule), &at(2024, 2, 12, 23, 59)), Ok(true));
        assert_eq!(is_open_now(Some(&schedule), &at(2024, 2, 12, 0, 0)), Ok(true));
    }

    #[test]
    fn test_malformed_time_is_an_error() {
        let schedule = gym_schedule().with_day(Weekday::Mon, DayHours::new("6am", "22:00"));
        assert_eq!(
            is_open_now(Some(&schedule), &at(2024, 2, 12, 12, 0)),
            Err(ScheduleError::InvalidScheduleFormat {
                value: "6am".to_string()
            })
        );
        // Other days still evaluate
        assert_eq!(is_open_now(Some(&schedule), &at(2024, 2, 13, 12, 0)), Ok(true));
    }

    #[test]
    fn test_malformed_time_on_closed_day_is_ignored() {
        let schedule = gym_schedule().with_day(
            Weekday::Mon,
            DayHours {
                open: "??".to_string(),
                close: "??".to_string(),
                closed: true,
            },
        );
        assert_eq!(is_open_now(Some(&schedule), &at(2024, 2, 12, 12, 0)), Ok(false));
    }

    // ==================== open_status Tests ====================

    #[test]
    fn test_open_status_variants() {
        let schedule = gym_schedule();
        assert_eq!(open_status(None, &at(2024, 2, 12, 3, 0)), Ok(OpenStatus::AlwaysOpen));
        assert_eq!(open_status(Some(&schedule), &at(2024, 2, 12, 12, 0)), Ok(OpenStatus::Open));
        assert_eq!(open_status(Some(&schedule), &at(2024, 2, 12, 23, 0)), Ok(OpenStatus::Closed));
    }

    #[test]
    fn test_open_status_labels() {
        assert_eq!(OpenStatus::AlwaysOpen.label(Locale::En), "Open 24/7");
        assert_eq!(OpenStatus::Open.label(Locale::Cs), "Otevřeno");
        assert_eq!(OpenStatus::Closed.label(Locale::En), "Closed");
        assert!(OpenStatus::AlwaysOpen.is_open());
        assert!(!OpenStatus::Closed.is_open());
    }

    // ==================== format_day_schedule Tests ====================

    #[test]
    fn test_format_open_day() {
        let row = format_day_schedule(Weekday::Tue, &DayHours::new("06:00", "22:00"), false, Locale::En);
        assert_eq!(row.label, "Tuesday");
        assert_eq!(row.hours_text(), "06:00 - 22:00");
        assert!(!row.is_today());
    }

    #[test]
    fn test_format_closed_day_ignores_times() {
        let hours = DayHours {
            open: "06:00".to_string(),
            close: "22:00".to_string(),
            closed: true,
        };
        let row = format_day_schedule(Weekday::Sun, &hours, true, Locale::Cs);
        assert_eq!(row.hours, RowHours::Closed);
        assert_eq!(row.hours_text(), "Zavřeno");
        assert_eq!(row.today, Some("Dnes"));
    }

    #[test]
    fn test_format_shows_stored_strings_verbatim() {
        let row = format_day_schedule(Weekday::Mon, &DayHours::new("6:00", "late"), false, Locale::En);
        assert_eq!(row.hours_text(), "6:00 - late");
    }

    #[test]
    fn test_display_row_render() {
        let row = format_day_schedule(Weekday::Mon, &DayHours::new("06:00", "22:00"), true, Locale::En);
        let text = row.to_string();
        assert!(text.starts_with("Monday"));
        assert!(text.contains("06:00 - 22:00"));
        assert!(text.ends_with("Today"));
    }

    // ==================== weekly_rows Tests ====================

    #[test]
    fn test_weekly_rows_order_and_today() {
        let schedule = gym_schedule().with_day(Weekday::Sun, DayHours::closed());
        // Wednesday
        let rows = weekly_rows(&schedule, &at(2024, 2, 14, 9, 0), Locale::En);

        let days: Vec<Weekday> = rows.iter().map(|row| row.weekday).collect();
        assert_eq!(days, WEEK_ORDER.to_vec());

        let today: Vec<Weekday> = rows.iter().filter(|r| r.is_today()).map(|r| r.weekday).collect();
        assert_eq!(today, vec![Weekday::Wed]);

        assert_eq!(rows[6].hours, RowHours::Closed);
    }

    // ==================== Property-Based Tests ====================

    #[cfg(test)]
    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        fn any_instant() -> impl Strategy<Value = NaiveDateTime> {
            (2000i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60)
                .prop_map(|(y, mo, d, h, mi)| at(y, mo, d, h, mi))
        }

        proptest! {
            #[test]
            fn absent_schedule_always_open(now in any_instant()) {
                prop_assert_eq!(is_open_now(None, &now), Ok(true));
            }

            #[test]
            fn closed_week_never_open(now in any_instant()) {
                let schedule = WeeklySchedule::uniform(DayHours::closed());
                prop_assert_eq!(is_open_now(Some(&schedule), &now), Ok(false));
            }

            #[test]
            fn weekday_depends_only_on_date(now in any_instant(), h in 0u32..24, m in 0u32..60) {
                let other = now.date().and_hms_opt(h, m, 0).unwrap();
                prop_assert_eq!(current_weekday(&now), current_weekday(&other));
            }

            #[test]
            fn open_matches_half_open_window(
                now in any_instant(),
                open in 0u32..1440,
                close in 0u32..=1440,
            ) {
                let open_t = ClockTime::from_hm(open / 60, open % 60).unwrap();
                let close_t = ClockTime::from_hm(close / 60, close % 60).unwrap();
                let schedule = WeeklySchedule::uniform(DayHours::new(open_t.to_string(), close_t.to_string()));

                let minute = now.hour() * 60 + now.minute();
                let expected = open <= minute && minute < close;
                prop_assert_eq!(is_open_now(Some(&schedule), &now), Ok(expected));
            }

            #[test]
            fn exactly_one_row_is_today(now in any_instant()) {
                let rows = weekly_rows(&gym_schedule(), &now, Locale::Cs);
                prop_assert_eq!(rows.len(), 7);
                prop_assert_eq!(rows.iter().filter(|r| r.is_today()).count(), 1);
            }
        }
    }
}
