//! Token payload shapes and the canonical HMAC input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{BatchId, CourseId, ExamEntryId, StudentId};
use std::fmt;

/// The two kinds of identifier the engine issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Student,
    Batch,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Student => write!(f, "student"),
            TokenType::Batch => write!(f, "batch"),
        }
    }
}

/// The verified contents of a token.
///
/// Serialized internally tagged on `type`, matching the wire format the
/// deployed scanners expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenPayload {
    Student {
        student_id: StudentId,
        exam_entry_id: ExamEntryId,
        course_id: CourseId,
        timestamp: DateTime<Utc>,
    },
    Batch {
        batch_id: BatchId,
        course_id: CourseId,
        course_code: String,
        exam_entry_id: ExamEntryId,
        timestamp: DateTime<Utc>,
    },
}

impl TokenPayload {
    pub fn token_type(&self) -> TokenType {
        match self {
            TokenPayload::Student { .. } => TokenType::Student,
            TokenPayload::Batch { .. } => TokenType::Batch,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            TokenPayload::Student { timestamp, .. } | TokenPayload::Batch { timestamp, .. } => {
                *timestamp
            }
        }
    }

    /// The canonical byte string the HMAC is computed over.
    ///
    /// Student tokens are keyed on `student_id:exam_entry_id:timestamp`,
    /// batch tokens on `batch_id:course_id:timestamp`. The remaining
    /// fields ride along unauthenticated, which is acceptable because
    /// every consumer re-reads them from the authenticated registration
    /// or batch row before acting.
    pub fn mac_message(&self) -> String {
        match self {
            TokenPayload::Student {
                student_id,
                exam_entry_id,
                timestamp,
                ..
            } => format!(
                "{}:{}:{}",
                student_id,
                exam_entry_id,
                timestamp.to_rfc3339()
            ),
            TokenPayload::Batch {
                batch_id,
                course_id,
                timestamp,
                ..
            } => format!("{}:{}:{}", batch_id, course_id, timestamp.to_rfc3339()),
        }
    }
}

/// On-the-wire shape: the payload plus the embedded hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TokenEnvelope {
    #[serde(flatten)]
    pub payload: TokenPayload,
    /// Hex-encoded HMAC-SHA-256 over [`TokenPayload::mac_message`].
    pub security_hash: String,
}
