use chrono::{Datelike, Timelike};

use crate::error::ScheduleError;
use crate::gym::Gym;
use crate::locale::Locale;
use crate::schedule::{DisplayRow, OpenStatus, weekly_rows};
use crate::traits::Clock;

/// Which gyms to show on the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GymFilter {
    pub multisport_only: bool,
}

impl GymFilter {
    pub fn matches(&self, gym: &Gym) -> bool {
        !self.multisport_only || gym.multisport
    }
}

/// A gym together with its evaluated badge.
#[derive(Debug, Clone)]
pub struct GymListing<'a> {
    pub gym: &'a Gym,
    pub status: OpenStatus,
}

/// The set of gyms fetched from the backend.
#[derive(Debug, Clone, Default)]
pub struct GymDirectory {
    gyms: Vec<Gym>,
}

impl GymDirectory {
    pub fn new(gyms: Vec<Gym>) -> Self {
        Self { gyms }
    }

    pub fn len(&self) -> usize {
        self.gyms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gyms.is_empty()
    }

    pub fn gyms(&self) -> &[Gym] {
        &self.gyms
    }

    pub fn filter(&self, filter: GymFilter) -> impl Iterator<Item = &Gym> {
        self.gyms.iter().filter(move |gym| filter.matches(gym))
    }

    /// Case-insensitive exact match on the gym name.
    pub fn find_by_name(&self, name: &str) -> Option<&Gym> {
        let needle = name.trim().to_lowercase();
        self.gyms.iter().find(|gym| gym.name.to_lowercase() == needle)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Gym> {
        self.gyms.iter().find(|gym| gym.id == id)
    }

    /// Gyms matching `filter`, each with its badge at `now`, sorted by name
    /// in Czech alphabetical order.
    pub fn listing<T>(&self, filter: GymFilter, now: &T) -> Vec<GymListing<'_>>
    where
        T: Datelike + Timelike,
    {
        let mut listings: Vec<GymListing<'_>> = self
            .filter(filter)
            .map(|gym| GymListing {
                gym,
                status: status_or_closed(gym, now),
            })
            .collect();
        listings.sort_by_cached_key(|listing| {
            (collation_key(&listing.gym.name), listing.gym.name.clone())
        });
        listings
    }

    pub fn listing_with_clock<C: Clock>(&self, filter: GymFilter, clock: &C) -> Vec<GymListing<'_>> {
        self.listing(filter, &clock.wall_clock())
    }
}

/// Badge for a gym, degrading to `Closed` when its hours cannot be read.
pub fn status_or_closed<T: Datelike + Timelike>(gym: &Gym, now: &T) -> OpenStatus {
    match gym.open_status(now) {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!(gym_id = %gym.id, gym = %gym.name, "Unreadable opening hours, showing closed: {}", e);
            OpenStatus::Closed
        }
    }
}

/// Weekly rows for a gym, `None` when it is open around the clock.
pub fn schedule_rows<T: Datelike>(
    gym: &Gym,
    now: &T,
    locale: Locale,
) -> Result<Option<Vec<DisplayRow>>, ScheduleError> {
    Ok(gym
        .schedule()?
        .map(|schedule| weekly_rows(&schedule, now, locale)))
}

/// Sort key following Czech alphabet order.
///
/// Case and acute/ring accents are folded into the base letter, while
/// č, ř, š and ž sort as separate letters right after c, r, s and z.
fn collation_key(name: &str) -> Vec<(char, u8)> {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'ä' => ('a', 0),
            'č' => ('c', 1),
            'ď' => ('d', 0),
            'é' | 'ě' => ('e', 0),
            'í' => ('i', 0),
            'ň' => ('n', 0),
            'ó' | 'ö' => ('o', 0),
            'ř' => ('r', 1),
            'š' => ('s', 1),
            'ť' => ('t', 0),
            'ú' | 'ů' | 'ü' => ('u', 0),
            'ý' => ('y', 0),
            'ž' => ('z', 1),
            other => (other, 0),
        })
        .collect()
}
