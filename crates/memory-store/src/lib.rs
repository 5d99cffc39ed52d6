//! # In-Memory Store Adapters
//!
//! Reference implementations of every storage and catalog port in
//! `shared-types`. Production swaps these for database- and service-backed
//! adapters; the engine crates and the unified test suite run against
//! these.
//!
//! All adapters use interior mutability (`RwLock` + atomic id sequences)
//! so they can be shared behind an `Arc` across concurrent operations,
//! and they enforce the same uniqueness constraints a relational schema
//! would: one registration per (student, exam entry), one batch per
//! (exam entry, course), one open script per (student, exam entry).

mod catalog;
mod clock;
mod stores;

pub use catalog::InMemoryCatalog;
pub use clock::{FixedClock, SystemClock};
pub use stores::{
    InMemoryBatchStore, InMemoryMovementStore, InMemoryRegistrationStore, InMemoryScriptStore,
};
