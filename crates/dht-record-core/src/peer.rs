//! Peer identity.
//!
//! A [`PeerId`] is an opaque byte identifier. Peers that own a public key
//! derive it as the sha2-256 multihash of the protobuf-encoded key.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::PublicKey;
use crate::error::MultihashError;
use crate::multihash::{decode_base58, HashAlgorithm, Multihash};

/// Identity of a record author.
///
/// Construction from raw bytes is total. Whether the bytes form a
/// well-formed identity is not this type's concern.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct PeerId(Vec<u8>);

impl PeerId {
    /// Wrap raw identity bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Derive the identity of the holder of `key`.
    pub fn from_public_key(key: &(impl PublicKey + ?Sized)) -> Self {
        Self(HashAlgorithm::Sha2_256.digest(&key.encode_protobuf()).to_bytes())
    }

    /// Parse the base58 text form.
    pub fn from_base58(s: &str) -> Result<Self, MultihashError> {
        decode_base58(s).map(Self)
    }

    /// The raw identity bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume into the raw identity bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Base58 text form.
    pub fn to_base58(&self) -> String {
        bs58::encode(&self.0).into_string()
    }

    /// Interpret the id as a multihash, if it is one.
    pub fn as_multihash(&self) -> Result<Multihash, MultihashError> {
        Multihash::from_bytes(&self.0)
    }

    /// True if this id was derived from `key`.
    pub fn matches_public_key(&self, key: &(impl PublicKey + ?Sized)) -> bool {
        *self == Self::from_public_key(key)
    }
}

impl fmt::Debug for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PeerId({})", self.to_base58())
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl AsRef<[u8]> for PeerId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for PeerId {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;

    #[test]
    fn test_from_public_key_is_multihash() {
        let keypair = Keypair::from_seed(&[0x42; 32]);
        let id = PeerId::from_public_key(&keypair.public_key());

        let mh = id.as_multihash().unwrap();
        assert_eq!(mh.algorithm(), HashAlgorithm::Sha2_256);
        assert!(id.to_base58().starts_with("Qm"));
        assert!(id.matches_public_key(&keypair.public_key()));
    }

    #[test]
    fn test_arbitrary_bytes_accepted() {
        let id = PeerId::from_bytes(vec![0xff, 0x00, 0x13]);
        assert_eq!(id.as_bytes(), &[0xff, 0x00, 0x13]);
        assert!(id.as_multihash().is_err());
    }

    #[test]
    fn test_base58_roundtrip() {
        let keypair = Keypair::from_seed(&[0x01; 32]);
        let id = PeerId::from_public_key(&keypair.public_key());
        let parsed = PeerId::from_base58(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_different_keys_different_ids() {
        let a = PeerId::from_public_key(&Keypair::from_seed(&[0x01; 32]).public_key());
        let b = PeerId::from_public_key(&Keypair::from_seed(&[0x02; 32]).public_key());
        assert_ne!(a, b);
    }
}
