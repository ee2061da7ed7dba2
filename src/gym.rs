use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::hours::{StoredWeek, WeeklySchedule};
use crate::schedule::{self, OpenStatus};

/// A gym as stored in the backend's `gyms` table.
///
/// Read-only on this side. Fields the directory never shows (legacy
/// `hours`, `rating`, `description`, `_creationTime`) are skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gym {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub address: String,
    /// `None` means the gym is open around the clock. Kept in stored form;
    /// completeness is checked on every evaluation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<StoredWeek>,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub multisport: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_entry_price: Option<f64>,
    #[serde(flatten)]
    pub equipment: Equipment,
}

/// Equipment details contributed by visitors. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rack_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dumbbell_max_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_deadlift_platform: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_magnesium: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_air_con: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_parking: Option<bool>,
}

impl Equipment {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Gym {
    /// The weekly schedule, `Ok(None)` for a gym without opening hours.
    pub fn schedule(&self) -> Result<Option<WeeklySchedule>, ScheduleError> {
        self.opening_hours.as_ref().map(StoredWeek::to_schedule).transpose()
    }

    pub fn is_open_now<T: Datelike + Timelike>(&self, now: &T) -> Result<bool, ScheduleError> {
        schedule::is_open_now(self.schedule()?.as_ref(), now)
    }

    pub fn open_status<T: Datelike + Timelike>(&self, now: &T) -> Result<OpenStatus, ScheduleError> {
        schedule::open_status(self.schedule()?.as_ref(), now)
    }

    /// `(longitude, latitude)` as the map expects it.
    pub fn coordinates(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }
}
