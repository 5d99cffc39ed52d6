//! # Script-Chain Test Suite
//!
//! Unified test crate for cross-subsystem choreography:
//!
//! ```text
//! tests/src/integration/
//! ├── harness.rs       # Full-stack in-memory fixture
//! ├── exam_day.rs      # Enroll -> scan -> submit -> seal happy paths
//! ├── custody_chain.rs # Ledger and handover guarantees
//! ├── reconciliation.rs# Counter/statistics invariants
//! └── concurrency.rs   # Parallel-scan single-success properties
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sc-tests
//!
//! # By area
//! cargo test -p sc-tests integration::exam_day
//! cargo test -p sc-tests integration::concurrency
//! ```

pub mod integration;
