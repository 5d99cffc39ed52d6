//! # Custody Ledger Subsystem (sc-02)
//!
//! Append-only record of every physical transfer of a script or batch.
//! The ledger is the single source of truth for where a script currently
//! is and who last touched it; every current-state field elsewhere is, in
//! principle, reconstructible from it.
//!
//! ## Design
//!
//! - **Dumb and trustworthy**: `append` performs no business-rule
//!   validation; that is the caller's job. Keeping the ledger free of
//!   policy is what makes it safe to trust as an audit trail.
//! - **No mutation**: neither this service nor the [`MovementStore`] port
//!   it drives exposes an update or delete path.
//! - **Per-batch replay order**: `recorded_at` is assigned server-side and
//!   clamped to be monotonically non-decreasing within a batch, so
//!   `history_for_batch` replays in a meaningful order even under clock
//!   skew. Cross-batch ordering is not guaranteed.
//!
//! [`MovementStore`]: shared_types::MovementStore

pub mod domain;

pub use domain::{CustodyLedger, LedgerError};
