//! The `pk` namespace: self-certifying public-key records.
//!
//! A valid record has key `/pk/<base58 multihash of value>` and a value
//! holding the protobuf-encoded public key. The hash in the key is the
//! proof of authenticity, so no signature is required.

use dht_record_core::{decode_base58, HashAlgorithm, PeerId, PublicKey, Record};

use crate::error::ValidationError;
use crate::validator::Validator;

/// Literal key prefix of the namespace.
const PREFIX: &[u8] = b"/pk/";

/// Validator for `/pk/` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicKeyValidator {
    algorithm: HashAlgorithm,
}

impl PublicKeyValidator {
    pub const NAMESPACE: &'static str = "pk";

    /// Shortest acceptable key: the prefix plus one hash character.
    pub const MIN_KEY_LEN: usize = PREFIX.len() + 1;

    /// Validate keys built with `algorithm` instead of sha2-256.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// The record key this validator expects for `key`.
    pub fn record_key(&self, key: &(impl PublicKey + ?Sized)) -> Vec<u8> {
        let hash = self.algorithm.digest(&key.encode_protobuf());
        let mut out = PREFIX.to_vec();
        out.extend_from_slice(hash.to_base58().as_bytes());
        out
    }
}

impl Validator for PublicKeyValidator {
    fn validate(&self, key: &[u8], value: &[u8]) -> Result<(), ValidationError> {
        let text = std::str::from_utf8(key)
            .map_err(|_| ValidationError::MalformedRecordKey("key must be a string".into()))?;

        if key.len() < Self::MIN_KEY_LEN {
            return Err(ValidationError::MalformedRecordKey(
                "invalid public key record".into(),
            ));
        }

        if !key.starts_with(PREFIX) {
            return Err(ValidationError::MalformedRecordKey(
                "key was not prefixed with /pk/".into(),
            ));
        }

        let embedded = decode_base58(&text[PREFIX.len()..])
            .map_err(|e| ValidationError::MalformedRecordKey(e.to_string()))?;

        if self.algorithm.digest(value).to_bytes() != embedded {
            return Err(ValidationError::RecordHashMismatch);
        }

        Ok(())
    }
}

/// The `/pk/` key for `key`, hashed with sha2-256.
pub fn public_key_record_key(key: &(impl PublicKey + ?Sized)) -> Vec<u8> {
    PublicKeyValidator::default().record_key(key)
}

/// A complete `/pk/` record publishing `key`, authored by its own peer id.
pub fn public_key_record(key: &(impl PublicKey + ?Sized)) -> Record {
    Record::new(
        public_key_record_key(key),
        key.encode_protobuf(),
        PeerId::from_public_key(key),
    )
}
