//! # DHT Record Core
//!
//! Pure primitives for DHT records: the signed record envelope, its binary
//! schema, peer identities, multihashes, and the signing keys.
//!
//! This crate contains no I/O, no storage, no networking, and no namespace
//! policy. Validation and conflict resolution live in `dht-record`.
//!
//! ## Key Types
//!
//! - [`Record`] - Key, value, author, optional timestamp and signature
//! - [`PeerId`] - Opaque author identity
//! - [`Multihash`] - Self-describing content hash
//! - [`PrivateKey`] / [`PublicKey`] - Signing and verification seams
//!
//! ## Signatures
//!
//! A record signature covers `key || value || author` with no framing. See
//! [`Record::blob_for_signature`].

pub mod crypto;
pub mod error;
pub mod multihash;
pub mod peer;
pub mod record;
pub mod wire;

pub use crypto::{decode_public_key, Ed25519PublicKey, KeyType, Keypair, PrivateKey, PublicKey};
pub use error::{CryptoError, MultihashError, RecordError};
pub use multihash::{decode_base58, HashAlgorithm, Multihash};
pub use peer::PeerId;
pub use record::Record;
pub use wire::RecordProto;
