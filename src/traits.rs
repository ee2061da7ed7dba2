//! Abstraction over time access.
//!
//! The evaluator itself takes an explicit instant; `Clock` is how the
//! directory and the binary obtain that instant, and how tests pin it.

use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDateTime};

// ==================== Clock Trait ====================

/// Trait for abstracting time access.
pub trait Clock: Send + Sync {
    /// Local wall-clock reading used for opening-hours checks.
    fn wall_clock(&self) -> NaiveDateTime;
}

/// System clock implementation using real time.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn wall_clock(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Mock clock pinned to a local wall-clock reading.
///
/// The reading is returned verbatim and never resolved against a timezone,
/// so tests behave the same on every machine, DST transitions included.
#[derive(Debug, Clone)]
pub struct MockClock {
    wall_clock: Arc<Mutex<NaiveDateTime>>,
}

impl MockClock {
    pub fn new(wall_clock: NaiveDateTime) -> Self {
        Self {
            wall_clock: Arc::new(Mutex::new(wall_clock)),
        }
    }

    /// Set the mock clock to a new time.
    pub fn set_time(&self, wall_clock: NaiveDateTime) {
        *self.wall_clock.lock().unwrap() = wall_clock;
    }

    /// Advance the clock by a duration of wall-clock time.
    pub fn advance(&self, duration: chrono::Duration) {
        let mut time = self.wall_clock.lock().unwrap();
        *time += duration;
    }
}

impl Clock for MockClock {
    fn wall_clock(&self) -> NaiveDateTime {
        *self.wall_clock.lock().unwrap()
    }
}
