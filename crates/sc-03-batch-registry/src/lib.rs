//! # Batch Registry Subsystem (sc-03)
//!
//! Owns the lifecycle of `BatchScript` containers and keeps their derived
//! counters consistent with the `Script` table and the custody ledger.
//!
//! ## Lifecycle
//!
//! ```text
//! Pending -> Sealed -> WithLecturer -> GradingInProgress -> GradingCompleted
//! ```
//!
//! `Sealed` is reached through [`BatchRegistry::seal`], `WithLecturer`
//! through [`BatchRegistry::assign_to_lecturer`] (which moves custody of
//! every script in the batch together with the container); the grading
//! statuses advance through [`BatchRegistry::advance_status`]. The audited
//! escape hatch [`BatchRegistry::override_status`] can set anything, and
//! records that it did.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | `scripts_graded <= scripts_submitted <= total_registered` | `recompute_counts` |
//! | Counters are a cache | recomputed from the Script table, never incremented |
//! | No double sealing | re-seal of `Sealed` is a no-op; past `Sealed` rejected |
//! | Batch custody moves atomically | `assign_to_lecturer` bulk-reassigns every script |

pub mod domain;

pub use domain::{BatchRegistry, BatchStatistics, RegistryError};
