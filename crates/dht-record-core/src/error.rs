//! Error types for the DHT record core.

use thiserror::Error;

/// Errors raised by the signing and verification primitives themselves.
///
/// These describe a problem with a key or algorithm, never a signature that
/// simply does not match.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(i32),

    #[error("malformed key encoding: {0}")]
    MalformedKey(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),
}

/// Errors raised while parsing or producing multihashes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MultihashError {
    #[error("unknown hash algorithm code: {0:#x}")]
    UnknownAlgorithm(u64),

    #[error("invalid varint in multihash")]
    InvalidVarint,

    #[error("digest length mismatch: declared {declared}, found {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("invalid base58 text: {0}")]
    InvalidBase58(String),
}

/// Errors that can occur during record operations.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The signature was checked and does not match the record contents.
    #[error("invalid record signature")]
    InvalidSignature,

    /// The public key or algorithm failed while verifying.
    #[error("signature verification error: {0}")]
    Verification(#[source] CryptoError),

    /// The private key failed while signing.
    #[error("signing error: {0}")]
    Signing(#[source] CryptoError),

    #[error("encoding error: {0}")]
    Encode(String),

    #[error("decoding error: {0}")]
    Decode(String),

    #[error("invalid timeReceived {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },
}

impl RecordError {
    /// True for errors caused by bytes that do not match the record schema.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            RecordError::Decode(_) | RecordError::InvalidTimestamp { .. }
        )
    }
}

impl From<prost::DecodeError> for RecordError {
    fn from(e: prost::DecodeError) -> Self {
        RecordError::Decode(e.to_string())
    }
}

impl From<prost::EncodeError> for RecordError {
    fn from(e: prost::EncodeError) -> Self {
        RecordError::Encode(e.to_string())
    }
}

/// Result type for record operations.
pub type Result<T> = std::result::Result<T, RecordError>;
