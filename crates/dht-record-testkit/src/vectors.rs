//! Golden test vectors for cross-implementation verification.
//!
//! The expected bytes are reproducible by any RFC 8032 Ed25519 and
//! sha2-256 implementation that follows the record schema. Every
//! implementation that exchanges DHT records must produce identical
//! encodings, signatures, and `/pk/` keys for these inputs.

use chrono::{DateTime, Utc};
use dht_record::public_key_record_key;
use dht_record_core::wire::parse_rfc3339;
use dht_record_core::{Keypair, PeerId, Record};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A golden test vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: String,
    /// Author seed (32 bytes hex).
    pub seed: String,
    /// Record key (hex).
    pub key: String,
    /// Record value (hex).
    pub value: String,
    /// RFC3339 receipt time, if any.
    pub time_received: Option<String>,
    /// Whether the record is signed by the seed's key.
    pub signed: bool,
    /// Expected author peer id (hex).
    pub expected_author: String,
    /// Expected record encoding (hex).
    pub expected_bytes: String,
}

const SEED_42: &str = "4242424242424242424242424242424242424242424242424242424242424242";
const AUTHOR_42: &str = "1220caf3df3522551fbb839d51c8e01080e8cce9bd26ed044f3fbda1f6733aa3e687";

/// The `/pk/` key for the public key of seed `0x42..`.
pub const PK_KEY_42: &str = "/pk/QmbztkDusuGpSJHUqDXjrZDS4gRtAsmQgvWtFFQP55QPci";

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "unsigned hello/world".into(),
            seed: SEED_42.into(),
            key: hex::encode("hello"),
            value: hex::encode("world"),
            time_received: None,
            signed: false,
            expected_author: AUTHOR_42.into(),
            expected_bytes: concat!(
                "0a0568656c6c6f",
                "1205776f726c64",
                "1a221220caf3df3522551fbb839d51c8e01080e8cce9bd26ed044f3fbda1f6733aa3e687",
            )
            .into(),
        },
        GoldenVector {
            name: "signed hello/world".into(),
            seed: SEED_42.into(),
            key: hex::encode("hello"),
            value: hex::encode("world"),
            time_received: None,
            signed: true,
            expected_author: AUTHOR_42.into(),
            expected_bytes: concat!(
                "0a0568656c6c6f",
                "1205776f726c64",
                "1a221220caf3df3522551fbb839d51c8e01080e8cce9bd26ed044f3fbda1f6733aa3e687",
                "224033cd76ea7e160ddb40ff5c32166f875937145ed8c0c442836e2d4aab8ed119b7",
                "5022d6dca525321afd02f78b8b54e8138b8e48c514a38f9fc4a0d39118cf290c",
            )
            .into(),
        },
        GoldenVector {
            name: "dated unsigned".into(),
            seed: SEED_42.into(),
            key: hex::encode("/feed/x"),
            value: hex::encode("v"),
            time_received: Some("2012-02-25T10:10:10.010000000Z".into()),
            signed: false,
            expected_author: AUTHOR_42.into(),
            expected_bytes: concat!(
                "0a072f666565642f78",
                "120176",
                "1a221220caf3df3522551fbb839d51c8e01080e8cce9bd26ed044f3fbda1f6733aa3e687",
                "2a1e323031322d30322d32355431303a31303a31302e3031303030303030305a",
            )
            .into(),
        },
        GoldenVector {
            name: "pk record".into(),
            seed: SEED_42.into(),
            key: hex::encode(PK_KEY_42),
            value: concat!(
                "08011220",
                "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db12",
            )
            .into(),
            time_received: None,
            signed: false,
            expected_author: AUTHOR_42.into(),
            expected_bytes: concat!(
                "0a322f706b2f516d627a746b447573754770534a48557144586a725a44533467527441",
                "736d5167765774464651503535515063",
                "69",
                "1224080112202152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db12",
                "1a221220caf3df3522551fbb839d51c8e01080e8cce9bd26ed044f3fbda1f6733aa3e687",
            )
            .into(),
        },
    ]
}

/// Errors in a vector's own inputs.
#[derive(Debug, Error)]
pub enum VectorError {
    #[error("invalid hex in vector: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("seed must be 32 bytes, got {0}")]
    Seed(usize),

    #[error("invalid timeReceived in vector: {0}")]
    Time(String),
}

fn seed_of(vector: &GoldenVector) -> Result<[u8; 32], VectorError> {
    let bytes = hex::decode(&vector.seed)?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| VectorError::Seed(len))
}

/// Build the record a vector describes.
pub fn record_from_vector(vector: &GoldenVector) -> Result<Record, VectorError> {
    let keypair = Keypair::from_seed(&seed_of(vector)?);
    let author = PeerId::from_public_key(&keypair.public_key());

    let key = hex::decode(&vector.key)?;
    let value = hex::decode(&vector.value)?;
    let mut record = Record::new(key, value, author);

    if let Some(text) = &vector.time_received {
        let time: DateTime<Utc> =
            parse_rfc3339(text).map_err(|e| VectorError::Time(e.to_string()))?;
        record = record.with_time_received(time);
    }

    if vector.signed {
        record = record
            .sign(&keypair)
            .expect("ed25519 signing cannot fail");
    }
    Ok(record)
}

/// Encode every vector and compare against the expected bytes.
///
/// Returns `(name, matches, actual_hex)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let actual = record_from_vector(v)
                .ok()
                .and_then(|r| r.encode().ok())
                .map(hex::encode)
                .unwrap_or_default();
            (v.name.clone(), actual == v.expected_bytes, actual)
        })
        .collect()
}

/// The vectors as pretty-printed JSON, for other implementations.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&all_vectors())
}

/// The `/pk/` key expected for the public key of `seed`.
pub fn pk_key_for_seed(seed: &[u8; 32]) -> Vec<u8> {
    public_key_record_key(&Keypair::from_seed(seed).public_key())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dht_record::ValidatorRegistry;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, actual) in verify_all_vectors() {
            assert!(matches, "vector '{name}' encoded as {actual}");
        }
    }

    #[test]
    fn test_vectors_decode_to_inputs() {
        for vector in all_vectors() {
            let expected = record_from_vector(&vector).unwrap();
            let bytes = hex::decode(&vector.expected_bytes).unwrap();
            let decoded = Record::decode(&bytes).unwrap();

            assert_eq!(decoded, expected, "vector '{}'", vector.name);
            assert_eq!(hex::encode(decoded.author().as_bytes()), vector.expected_author);
        }
    }

    #[test]
    fn test_signed_vector_verifies() {
        let vector = all_vectors().into_iter().find(|v| v.signed).unwrap();
        let keypair = Keypair::from_seed(&seed_of(&vector).unwrap());
        let record = Record::decode(&hex::decode(&vector.expected_bytes).unwrap()).unwrap();

        record.verify_signature(&keypair.public_key()).unwrap();
    }

    #[test]
    fn test_pk_vector() {
        assert_eq!(pk_key_for_seed(&[0x42; 32]), PK_KEY_42.as_bytes());

        let vector = all_vectors()
            .into_iter()
            .find(|v| v.name == "pk record")
            .unwrap();
        let record = record_from_vector(&vector).unwrap();
        ValidatorRegistry::with_defaults()
            .verify_record(&record)
            .unwrap();
    }

    #[test]
    fn test_malformed_vector_errors() {
        let mut vector = all_vectors().remove(0);
        vector.seed = "4242".into();
        let err = record_from_vector(&vector).unwrap_err();
        assert!(matches!(err, VectorError::Seed(2)));
        assert_eq!(err.to_string(), "seed must be 32 bytes, got 2");

        let mut vector = all_vectors().remove(0);
        vector.key = "zz".into();
        let err = record_from_vector(&vector).unwrap_err();
        assert!(matches!(err, VectorError::Hex(_)));
        assert!(err.to_string().starts_with("invalid hex in vector"));

        let mut vector = all_vectors().remove(0);
        vector.time_received = Some("yesterday".into());
        let err: Box<dyn std::error::Error> = record_from_vector(&vector).unwrap_err().into();
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn test_json_roundtrip() {
        let json = vectors_json().unwrap();
        let parsed: Vec<GoldenVector> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, all_vectors());
    }
}
