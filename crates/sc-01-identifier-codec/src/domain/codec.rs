//! Encode and verify tamper-evident identifiers.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroize;

use shared_types::{BatchId, CourseId, ExamEntryId, StudentId};

use super::errors::CodecError;
use super::payload::{TokenEnvelope, TokenPayload, TokenType};

type HmacSha256 = Hmac<Sha256>;

/// Symmetric signing key for token hashes.
///
/// Process-wide secret; rotating it invalidates every outstanding token.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Wrap existing key material (e.g. from configuration).
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Generate a random 256-bit key.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; 32];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
        Self(bytes)
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Stateless encoder/verifier for student and batch tokens.
pub struct IdentifierCodec {
    key: SigningKey,
}

impl IdentifierCodec {
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Mint the token printed on a student's exam slip.
    ///
    /// `issued_at` comes from the caller's clock; the same fields with the
    /// same timestamp always reproduce the same token.
    pub fn encode_student_token(
        &self,
        student_id: StudentId,
        exam_entry_id: ExamEntryId,
        course_id: CourseId,
        issued_at: DateTime<Utc>,
    ) -> Result<String, CodecError> {
        self.encode(TokenPayload::Student {
            student_id,
            exam_entry_id,
            course_id,
            timestamp: issued_at,
        })
    }

    /// Mint the token printed on a batch envelope.
    ///
    /// Callers must pass the real, store-assigned batch id: the batch row
    /// is inserted first and the token minted afterwards, so no
    /// provisional token ever exists.
    pub fn encode_batch_token(
        &self,
        batch_id: BatchId,
        course_id: CourseId,
        course_code: &str,
        exam_entry_id: ExamEntryId,
        issued_at: DateTime<Utc>,
    ) -> Result<String, CodecError> {
        self.encode(TokenPayload::Batch {
            batch_id,
            course_id,
            course_code: course_code.to_owned(),
            exam_entry_id,
            timestamp: issued_at,
        })
    }

    fn encode(&self, payload: TokenPayload) -> Result<String, CodecError> {
        let security_hash = hex::encode(self.mac(&payload)?);
        let envelope = TokenEnvelope {
            payload,
            security_hash,
        };
        let json =
            serde_json::to_vec(&envelope).map_err(|e| CodecError::Encoding(e.to_string()))?;
        Ok(BASE64.encode(json))
    }

    /// Reverse the encoding, recompute the HMAC, and compare it to the
    /// embedded hash.
    ///
    /// Failure order: [`CodecError::InvalidFormat`] when the token cannot
    /// be parsed, [`CodecError::TypeMismatch`] when the payload kind is
    /// not `expected`, [`CodecError::TamperDetected`] when the hash does
    /// not verify. Verification is constant-time.
    pub fn decode_and_verify(
        &self,
        token: &str,
        expected: TokenType,
    ) -> Result<TokenPayload, CodecError> {
        let json = BASE64
            .decode(token.trim())
            .map_err(|_| CodecError::InvalidFormat)?;
        let envelope: TokenEnvelope =
            serde_json::from_slice(&json).map_err(|_| CodecError::InvalidFormat)?;

        let actual = envelope.payload.token_type();
        if actual != expected {
            return Err(CodecError::TypeMismatch { expected, actual });
        }

        let embedded = hex::decode(&envelope.security_hash)
            .map_err(|_| CodecError::TamperDetected)?;
        let mut mac = HmacSha256::new_from_slice(self.key.as_bytes())
            .map_err(|e| CodecError::Encoding(e.to_string()))?;
        mac.update(envelope.payload.mac_message().as_bytes());
        // Constant-time comparison.
        mac.verify_slice(&embedded)
            .map_err(|_| CodecError::TamperDetected)?;

        Ok(envelope.payload)
    }

    fn mac(&self, payload: &TokenPayload) -> Result<Vec<u8>, CodecError> {
        let mut mac = HmacSha256::new_from_slice(self.key.as_bytes())
            .map_err(|e| CodecError::Encoding(e.to_string()))?;
        mac.update(payload.mac_message().as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// Opt-in expiry check: pure time-difference comparison, never enforced by
/// the codec itself.
pub fn is_expired(issued_at: DateTime<Utc>, now: DateTime<Utc>, max_age_hours: i64) -> bool {
    now.signed_duration_since(issued_at) > Duration::hours(max_age_hours)
}
