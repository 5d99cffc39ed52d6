//! # Identifier Codec Subsystem (sc-01)
//!
//! Produces and verifies the short opaque tokens that field devices scan:
//! one per student-exam registration, one per script batch. Tokens are
//! self-contained: a scanner can detect tampering without a network
//! round-trip.
//!
//! ## Wire Format
//!
//! A token is the standard-alphabet base64 of a JSON object:
//!
//! ```text
//! { "type": "student" | "batch",
//!   ...domain fields...,
//!   "timestamp": <RFC 3339>,
//!   "security_hash": <hex HMAC-SHA-256> }
//! ```
//!
//! This format is a stable external boundary: scanners already in the
//! field depend on it. Rotating the signing key invalidates every
//! previously-issued token, an all-or-nothing operation.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Determinism | Same fields + same timestamp reproduce the same hash |
//! | Tamper evidence | HMAC verified with a constant-time comparison |
//! | Failure ordering | `InvalidFormat`, then `TypeMismatch`, then `TamperDetected` |
//!
//! Expiry is opt-in: [`is_expired`] is a pure comparison that callers may
//! apply; the codec itself never rejects an old token.

pub mod domain;

pub use domain::{is_expired, CodecError, IdentifierCodec, SigningKey, TokenPayload, TokenType};
