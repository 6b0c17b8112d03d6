//! Cryptographic primitives for DHT records.
//!
//! Signing and verification are consumed through the [`PrivateKey`] and
//! [`PublicKey`] traits. Ed25519 is provided via ed25519-dalek.
//!
//! Public keys travel in the DHT's protobuf key envelope:
//! `{ Type = 1: KeyType, Data = 2: bytes }`.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use prost::Message;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CryptoError;

/// Key algorithms understood by the protobuf key envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum KeyType {
    Rsa = 0,
    Ed25519 = 1,
    Secp256k1 = 2,
    Ecdsa = 3,
}

/// Wire form of a public key.
#[derive(Clone, PartialEq, Message)]
pub struct PublicKeyProto {
    #[prost(enumeration = "KeyType", tag = "1")]
    pub key_type: i32,

    #[prost(bytes = "vec", tag = "2")]
    pub data: Vec<u8>,
}

/// A key able to produce signatures.
pub trait PrivateKey: Send + Sync {
    /// Sign `message`, returning the raw signature bytes.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// A key able to check signatures.
pub trait PublicKey: Send + Sync {
    /// Check `signature` over `message`.
    ///
    /// `Ok(false)` means the signature does not match. `Err` means the key or
    /// algorithm could not perform the check at all.
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CryptoError>;

    /// The algorithm of this key.
    fn key_type(&self) -> KeyType;

    /// Raw key bytes as carried in the envelope's `Data` field.
    fn raw_bytes(&self) -> Vec<u8>;

    /// Marshal into the protobuf key envelope.
    fn encode_protobuf(&self) -> Vec<u8> {
        PublicKeyProto {
            key_type: self.key_type() as i32,
            data: self.raw_bytes(),
        }
        .encode_to_vec()
    }
}

/// Unmarshal a public key from the protobuf key envelope.
pub fn decode_public_key(bytes: &[u8]) -> Result<Box<dyn PublicKey>, CryptoError> {
    let proto =
        PublicKeyProto::decode(bytes).map_err(|e| CryptoError::MalformedKey(e.to_string()))?;

    match KeyType::try_from(proto.key_type) {
        Ok(KeyType::Ed25519) => {
            let arr: [u8; 32] = proto.data.as_slice().try_into().map_err(|_| {
                CryptoError::InvalidPublicKey(format!(
                    "ed25519 key must be 32 bytes, got {}",
                    proto.data.len()
                ))
            })?;
            Ok(Box::new(Ed25519PublicKey(arr)))
        }
        _ => Err(CryptoError::UnsupportedKeyType(proto.key_type)),
    }
}

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ed25519PublicKey(pub [u8; 32]);

impl Ed25519PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl PublicKey for Ed25519PublicKey {
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CryptoError> {
        let verifying_key = VerifyingKey::from_bytes(&self.0)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;

        // A signature of the wrong length can never match.
        let sig = match Signature::from_slice(signature) {
            Ok(sig) => sig,
            Err(_) => return Ok(false),
        };

        Ok(verifying_key.verify(message, &sig).is_ok())
    }

    fn key_type(&self) -> KeyType {
        KeyType::Ed25519
    }

    fn raw_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Pub({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Ed25519PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Ed25519PublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// An Ed25519 keypair for signing records.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Get the public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Get the raw seed bytes (secret key material).
    pub fn seed(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

impl PrivateKey for Keypair {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let sig = self
            .signing_key
            .try_sign(message)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        Ok(sig.to_bytes().to_vec())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.public_key())
    }
}
