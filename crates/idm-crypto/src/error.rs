//! Crypto error types.

use thiserror::Error;

/// Errors from key material decode/encode.
///
/// These are fatal to the operation that triggered the decode; the
/// caller propagates them and never retries.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The PEM text could not be decoded to bytes.
    #[error("invalid PEM: {0}")]
    InvalidPem(String),

    /// The decoded bytes are not a well-formed DER structure.
    #[error("invalid DER: {0}")]
    InvalidDer(String),
}
