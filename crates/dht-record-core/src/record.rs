//! Record: the signed envelope stored under a DHT key.
//!
//! A record binds a value to a namespaced key and to the identity of its
//! author. Key and value are fixed at construction. The only state that may
//! change is the signature, and only by consuming the record through
//! [`Record::sign`].

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::crypto::{PrivateKey, PublicKey};
use crate::error::{RecordError, Result};
use crate::peer::PeerId;
use crate::wire::{format_rfc3339, parse_rfc3339, RecordProto};

/// A DHT record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    key: Bytes,
    value: Bytes,
    author: PeerId,
    time_received: Option<DateTime<Utc>>,
    signature: Option<Bytes>,
}

impl Record {
    /// Create an unsigned record.
    pub fn new(key: impl Into<Bytes>, value: impl Into<Bytes>, author: PeerId) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            author,
            time_received: None,
            signature: None,
        }
    }

    /// Set the time the record was received.
    pub fn with_time_received(mut self, time: DateTime<Utc>) -> Self {
        self.time_received = Some(time);
        self
    }

    pub fn key(&self) -> &Bytes {
        &self.key
    }

    pub fn value(&self) -> &Bytes {
        &self.value
    }

    pub fn author(&self) -> &PeerId {
        &self.author
    }

    pub fn time_received(&self) -> Option<&DateTime<Utc>> {
        self.time_received.as_ref()
    }

    pub fn signature(&self) -> Option<&Bytes> {
        self.signature.as_ref()
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// The bytes protected by the signature: `key || value || author`.
    ///
    /// Plain concatenation with no length prefixes. Other implementations
    /// sign exactly these bytes, so the layout is frozen.
    pub fn blob_for_signature(&self) -> Vec<u8> {
        let author = self.author.as_bytes();
        let mut blob = Vec::with_capacity(self.key.len() + self.value.len() + author.len());
        blob.extend_from_slice(&self.key);
        blob.extend_from_slice(&self.value);
        blob.extend_from_slice(author);
        blob
    }

    /// Sign the record, consuming the unsigned value.
    ///
    /// Any previous signature is replaced.
    pub fn sign<K: PrivateKey + ?Sized>(mut self, key: &K) -> Result<Self> {
        let signature = key
            .sign(&self.blob_for_signature())
            .map_err(RecordError::Signing)?;
        self.signature = Some(signature.into());
        Ok(self)
    }

    /// Sign the record and encode it.
    ///
    /// Returns the signed record alongside its encoding.
    pub fn encode_signed<K: PrivateKey + ?Sized>(self, key: &K) -> Result<(Self, Vec<u8>)> {
        let signed = self.sign(key)?;
        let bytes = signed.encode()?;
        Ok((signed, bytes))
    }

    /// Encode to the binary record schema.
    pub fn encode(&self) -> Result<Vec<u8>> {
        self.to_proto().encode_to_bytes()
    }

    /// Decode from the binary record schema.
    ///
    /// Missing key, value, or author fields decode as empty.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        Self::from_proto(RecordProto::decode_from_slice(raw)?)
    }

    /// Build the wire message for this record.
    pub fn to_proto(&self) -> RecordProto {
        RecordProto {
            key: Some(self.key.to_vec()),
            value: Some(self.value.to_vec()),
            author: Some(self.author.as_bytes().to_vec()),
            signature: self.signature.as_ref().map(|s| s.to_vec()),
            time_received: self.time_received.as_ref().map(format_rfc3339),
        }
    }

    /// Rebuild a record from its wire message.
    pub fn from_proto(proto: RecordProto) -> Result<Self> {
        let time_received = match proto.time_received.as_deref() {
            Some(text) if !text.is_empty() => Some(parse_rfc3339(text)?),
            _ => None,
        };

        Ok(Self {
            key: proto.key.unwrap_or_default().into(),
            value: proto.value.unwrap_or_default().into(),
            author: PeerId::from_bytes(proto.author.unwrap_or_default()),
            time_received,
            signature: proto.signature.map(Bytes::from),
        })
    }

    /// Check the signature against `key`.
    ///
    /// The blob is recomputed from the current fields on every call. A
    /// record without a signature fails as a mismatch.
    pub fn verify_signature<K: PublicKey + ?Sized>(&self, key: &K) -> Result<()> {
        let signature = self.signature.as_deref().unwrap_or_default();
        let good = key
            .verify(&self.blob_for_signature(), signature)
            .map_err(RecordError::Verification)?;

        if good {
            Ok(())
        } else {
            Err(RecordError::InvalidSignature)
        }
    }
}
