//! # Shared Types Crate
//!
//! Single source of truth for the chain-of-custody domain: entity
//! definitions, id aliases, the status and movement enumerations, the
//! storage and catalog ports, and the shared error types.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every cross-subsystem type lives here.
//! - **Counters Are a Cache**: the derived counters on [`BatchScript`] are
//!   recomputed from the `Script` table, never incremented in place.
//! - **Append-Only Ledger**: [`ScriptMovement`] rows are immutable; the
//!   [`MovementStore`] port exposes no update or delete operation.

pub mod catalog;
pub mod entities;
pub mod errors;
pub mod stores;
pub mod time;

pub use catalog::*;
pub use entities::*;
pub use errors::*;
pub use stores::*;
pub use time::TimeSource;
