//! Proptest generators for property-based testing.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use dht_record_core::{Ed25519PublicKey, Keypair, PeerId, Record};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random Ed25519PublicKey.
pub fn public_key() -> impl Strategy<Value = Ed25519PublicKey> {
    keypair().prop_map(|kp| kp.public_key())
}

/// Generate an opaque peer id.
pub fn peer_id() -> impl Strategy<Value = PeerId> {
    prop::collection::vec(any::<u8>(), 0..=40).prop_map(PeerId::from_bytes)
}

/// Generate a namespaced key: `/<namespace>/<id>`.
pub fn namespaced_key() -> impl Strategy<Value = Vec<u8>> {
    ("[a-z]{1,8}", prop::collection::vec(any::<u8>(), 1..=32)).prop_map(|(ns, id)| {
        let mut key = format!("/{ns}/").into_bytes();
        key.extend(id);
        key
    })
}

/// Generate any key, namespaced or not.
pub fn record_key() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        namespaced_key(),
        prop::collection::vec(any::<u8>(), 0..=64),
    ]
}

/// Generate value bytes of specified max length.
pub fn value(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a receipt time with nanosecond precision.
pub fn time_received() -> impl Strategy<Value = DateTime<Utc>> {
    // Up to year 9999, the RFC3339 range.
    (0i64..=253_402_300_799i64, 0u32..1_000_000_000u32)
        .prop_map(|(secs, nanos)| Utc.timestamp_opt(secs, nanos).single().unwrap_or_default())
}

/// Parameters for generating a record.
#[derive(Debug, Clone)]
pub struct RecordParams {
    pub seed: [u8; 32],
    pub key: Vec<u8>,
    pub value: Vec<u8>,
    pub time_received: Option<DateTime<Utc>>,
    pub signed: bool,
}

impl Arbitrary for RecordParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            any::<[u8; 32]>(), // seed
            record_key(),
            value(1000),
            proptest::option::of(time_received()),
            any::<bool>(),
        )
            .prop_map(|(seed, key, value, time_received, signed)| RecordParams {
                seed,
                key,
                value,
                time_received,
                signed,
            })
            .boxed()
    }
}

/// Generate a record from parameters, authored by the seed's peer id.
pub fn record_from_params(params: &RecordParams) -> Record {
    let keypair = Keypair::from_seed(&params.seed);
    let author = PeerId::from_public_key(&keypair.public_key());

    let mut record = Record::new(params.key.clone(), params.value.clone(), author);
    if let Some(time) = params.time_received {
        record = record.with_time_received(time);
    }

    if params.signed {
        record = record
            .sign(&keypair)
            .expect("ed25519 signing cannot fail");
    }
    record
}
