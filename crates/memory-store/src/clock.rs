//! Time sources: the real clock and a pinnable one for tests.

use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use shared_types::TimeSource;

/// Wall-clock time source for production wiring.
#[derive(Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to an explicit instant, movable in both directions so
/// tests can simulate elapsed time and clock skew.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(instant),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.write().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }

    pub fn rewind(&self, by: Duration) {
        let mut now = self.now.write().unwrap_or_else(PoisonError::into_inner);
        *now -= by;
    }
}

impl TimeSource for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(PoisonError::into_inner)
    }
}
