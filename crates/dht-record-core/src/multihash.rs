//! Self-describing content hashes.
//!
//! A multihash is `varint(code) || varint(digest_len) || digest`. Public-key
//! records embed one, base58-encoded, in their key.

use prost::encoding::{decode_varint, encode_varint};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::MultihashError;

/// Hash algorithms a multihash may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    /// SHA2-256, the algorithm peer ids and `pk` keys are built from.
    #[default]
    Sha2_256,
    /// BLAKE3 with a 32-byte output.
    Blake3,
}

impl HashAlgorithm {
    /// Multicodec code for this algorithm.
    pub const fn code(self) -> u64 {
        match self {
            HashAlgorithm::Sha2_256 => 0x12,
            HashAlgorithm::Blake3 => 0x1e,
        }
    }

    /// Look up an algorithm by multicodec code.
    pub fn from_code(code: u64) -> Result<Self, MultihashError> {
        match code {
            0x12 => Ok(HashAlgorithm::Sha2_256),
            0x1e => Ok(HashAlgorithm::Blake3),
            other => Err(MultihashError::UnknownAlgorithm(other)),
        }
    }

    /// Hash `data` and wrap the digest.
    pub fn digest(self, data: &[u8]) -> Multihash {
        let digest = match self {
            HashAlgorithm::Sha2_256 => Sha256::digest(data).to_vec(),
            HashAlgorithm::Blake3 => blake3::hash(data).as_bytes().to_vec(),
        };
        Multihash {
            algorithm: self,
            digest,
        }
    }
}

/// A digest tagged with the algorithm that produced it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Multihash {
    algorithm: HashAlgorithm,
    digest: Vec<u8>,
}

impl Multihash {
    /// The algorithm that produced the digest.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// The raw digest bytes.
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Binary multihash encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.digest.len() + 2);
        encode_varint(self.algorithm.code(), &mut out);
        encode_varint(self.digest.len() as u64, &mut out);
        out.extend_from_slice(&self.digest);
        out
    }

    /// Parse a binary multihash. Trailing bytes are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MultihashError> {
        let mut buf = bytes;
        let code = decode_varint(&mut buf).map_err(|_| MultihashError::InvalidVarint)?;
        let algorithm = HashAlgorithm::from_code(code)?;
        let declared =
            decode_varint(&mut buf).map_err(|_| MultihashError::InvalidVarint)? as usize;
        if buf.len() != declared {
            return Err(MultihashError::LengthMismatch {
                declared,
                actual: buf.len(),
            });
        }
        Ok(Self {
            algorithm,
            digest: buf.to_vec(),
        })
    }

    /// Base58 (bitcoin alphabet) text form.
    pub fn to_base58(&self) -> String {
        bs58::encode(self.to_bytes()).into_string()
    }

    /// Parse the base58 text form.
    pub fn from_base58(s: &str) -> Result<Self, MultihashError> {
        Self::from_bytes(&decode_base58(s)?)
    }
}

/// Decode base58 text (bitcoin alphabet) to raw bytes.
pub fn decode_base58(s: &str) -> Result<Vec<u8>, MultihashError> {
    bs58::decode(s)
        .into_vec()
        .map_err(|e| MultihashError::InvalidBase58(e.to_string()))
}

impl fmt::Debug for Multihash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Multihash({:?}, {})", self.algorithm, hex::encode(&self.digest))
    }
}

impl fmt::Display for Multihash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}
