//! Pure codec logic: payload shapes, signing key, encode/verify.

mod codec;
mod errors;
mod payload;

pub use codec::{is_expired, IdentifierCodec, SigningKey};
pub use errors::CodecError;
pub use payload::{TokenPayload, TokenType};
