use thiserror::Error;

use super::payload::TokenType;

/// Token decode/verify failures.
///
/// Every variant maps to a one-line, operator-actionable message; none of
/// them are retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The token could not be parsed back into a payload.
    #[error("identifier is not a valid token")]
    InvalidFormat,

    /// The token parsed, but is not the kind the caller expected
    /// (e.g. a batch token presented at a student scan point).
    #[error("expected a {expected} token, got a {actual} token")]
    TypeMismatch {
        expected: TokenType,
        actual: TokenType,
    },

    /// The recomputed HMAC does not match the embedded hash.
    #[error("identifier failed tamper verification")]
    TamperDetected,

    /// The payload could not be serialized at encode time.
    #[error("token encoding failed: {0}")]
    Encoding(String),
}
