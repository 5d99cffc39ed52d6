//! Abstract time source so token timestamps and custody timestamps can be
//! pinned in tests.

use chrono::{DateTime, Utc};

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Current wall-clock time, UTC.
    fn now(&self) -> DateTime<Utc>;
}
