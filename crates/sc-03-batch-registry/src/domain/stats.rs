//! Derived batch statistics.

use serde::{Deserialize, Serialize};
use shared_types::BatchScript;

/// Snapshot of a batch's progress, derived from the cached counters.
///
/// Rates are percentages rounded to two decimal places and default to 0
/// when their denominator is 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStatistics {
    pub total_registered: u32,
    pub scripts_submitted: u32,
    pub scripts_graded: u32,
    /// Registered students whose script has not been collected yet.
    pub pending: u32,
    /// `scripts_submitted / total_registered`, as a percentage.
    pub submission_rate: f64,
    /// `scripts_graded / scripts_submitted`, as a percentage.
    pub grading_progress: f64,
}

impl BatchStatistics {
    pub fn for_batch(batch: &BatchScript) -> Self {
        Self {
            total_registered: batch.total_registered,
            scripts_submitted: batch.scripts_submitted,
            scripts_graded: batch.scripts_graded,
            pending: batch.total_registered.saturating_sub(batch.scripts_submitted),
            submission_rate: percentage(batch.scripts_submitted, batch.total_registered),
            grading_progress: percentage(batch.scripts_graded, batch.scripts_submitted),
        }
    }
}

fn percentage(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let rate = f64::from(numerator) / f64::from(denominator) * 100.0;
    (rate * 100.0).round() / 100.0
}
