//! End-to-end checks of validation, selection, and resolution over real keys.

use std::error::Error;
use std::sync::{Arc, Once};

use bytes::Bytes;
use chrono::{TimeZone, Utc};
use dht_record::core::{Keypair, PeerId, PublicKey, Record, RecordError};
use dht_record::{
    key, public_key_record, public_key_record_key, KeyRing, LatestReceivedSelector, ResolveError,
    Resolver, ResolverConfig, SelectionError, SelectorRegistry, ValidationError, Validator,
    ValidatorRegistry,
};
use proptest::prelude::*;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

fn peer(kp: &Keypair) -> PeerId {
    PeerId::from_public_key(&kp.public_key())
}

// ============================================================================
// pk namespace
// ============================================================================

#[test]
fn test_pk_accepts_real_key() {
    init_tracing();
    let kp = Keypair::from_seed(&[0x11; 32]);
    let record = public_key_record(&kp.public_key());

    assert!(record.key().starts_with(b"/pk/"));
    ValidatorRegistry::with_defaults()
        .verify_record(&record)
        .unwrap();
}

#[test]
fn test_pk_truncated_key() {
    let kp = Keypair::from_seed(&[0x11; 32]);
    let record = Record::new("/pk/", kp.public_key().encode_protobuf(), peer(&kp));

    assert!(matches!(
        ValidatorRegistry::with_defaults().verify_record(&record),
        Err(ValidationError::MalformedRecordKey(_))
    ));
}

#[test]
fn test_pk_other_keys_hash() {
    let ours = Keypair::from_seed(&[0x11; 32]);
    let theirs = Keypair::from_seed(&[0x22; 32]);

    let record = Record::new(
        public_key_record_key(&theirs.public_key()),
        public_key_record(&ours.public_key()).value().clone(),
        peer(&ours),
    );

    assert!(matches!(
        ValidatorRegistry::with_defaults().verify_record(&record),
        Err(ValidationError::RecordHashMismatch)
    ));
}

// ============================================================================
// Registry dispatch
// ============================================================================

#[test]
fn test_calls_matching_validator() {
    init_tracing();
    let registry = ValidatorRegistry::new().register(
        "hello",
        |key: &[u8], value: &[u8]| -> Result<(), ValidationError> {
            assert_eq!(key, b"/hello/you");
            assert_eq!(value, b"world");
            Ok(())
        },
    );

    let record = Record::new("/hello/you", "world", PeerId::default());
    registry.verify_record(&record).unwrap();
}

#[test]
fn test_no_matching_validator() {
    let registry = ValidatorRegistry::new().register(
        "hello",
        |_: &[u8], _: &[u8]| -> Result<(), ValidationError> { Ok(()) },
    );

    let record = Record::new("/hallo/you", "world", PeerId::default());
    let err = registry.verify_record(&record).unwrap_err();
    assert!(matches!(err, ValidationError::UnknownNamespace(ref ns) if ns == "hallo"));
    assert!(err.to_string().contains("invalid record keytype"));
}

#[test]
fn test_default_namespaces() {
    let defaults = ValidatorRegistry::with_defaults();
    assert_eq!(defaults.namespaces().collect::<Vec<_>>(), vec!["pk"]);

    let with_ipns = defaults.with_ipns(
        |_: &[u8], _: &[u8]| -> Result<(), Box<dyn Error + Send + Sync>> { Ok(()) },
    );
    let mut names: Vec<_> = with_ipns.namespaces().collect();
    names.sort_unstable();
    assert_eq!(names, vec!["ipns", "pk"]);
}

#[test]
fn test_ipns_rejection_surfaces_through_registry() {
    let registry = ValidatorRegistry::with_defaults().with_ipns(
        |_: &[u8], _: &[u8]| -> Result<(), Box<dyn Error + Send + Sync>> {
            Err("sequence number went backwards".into())
        },
    );

    let record = Record::new("/ipns/\x12\x20id", "entry", PeerId::default());
    let err = registry.verify_record(&record).unwrap_err();
    assert!(err.to_string().contains("sequence number went backwards"));
    assert!(err.source().is_some());
}

// ============================================================================
// Resolution across peers
// ============================================================================

#[test]
fn test_resolve_pk_among_garbage() {
    init_tracing();
    let kp = Keypair::from_seed(&[0x33; 32]);
    let good = public_key_record(&kp.public_key());
    let forged = Record::new(
        good.key().clone(),
        public_key_record(&Keypair::from_seed(&[0x44; 32]).public_key())
            .value()
            .clone(),
        peer(&kp),
    );

    let candidates: Vec<Bytes> = vec![
        Bytes::from_static(b"\x0a\xff"),
        forged.encode().unwrap().into(),
        good.encode().unwrap().into(),
    ];

    let resolver = Resolver::new(
        Arc::new(ValidatorRegistry::with_defaults()),
        Arc::new(SelectorRegistry::default()),
        ResolverConfig::default(),
    );
    let resolution = resolver.resolve(good.key(), &candidates).unwrap();

    assert_eq!(resolution.index, 2);
    assert_eq!(resolution.record, good);
    assert_eq!(resolution.rejected.len(), 2);
    assert!(matches!(
        resolution.rejected[1].1,
        ResolveError::Validation(ValidationError::RecordHashMismatch)
    ));
}

struct SignedFeed;

impl Validator for SignedFeed {
    fn validate(&self, _key: &[u8], _value: &[u8]) -> Result<(), ValidationError> {
        Ok(())
    }

    fn requires_signature(&self) -> bool {
        true
    }
}

fn feed_resolver(parties: &[Keypair]) -> Resolver {
    let keys = parties
        .iter()
        .fold(KeyRing::new(), |ring, kp| ring.with_key(kp.public_key()));

    Resolver::new(
        Arc::new(ValidatorRegistry::with_defaults().register("feed", SignedFeed)),
        Arc::new(SelectorRegistry::default().register("feed", LatestReceivedSelector)),
        ResolverConfig::default(),
    )
    .with_author_keys(keys)
}

#[test]
fn test_resolve_latest_signed_feed_entry() {
    init_tracing();
    let parties: Vec<_> = (1u8..=3).map(|i| Keypair::from_seed(&[i; 32])).collect();
    let at = |secs| Utc.timestamp_opt(secs, 0).unwrap();

    let dated = |kp: &Keypair, value: &'static str, secs: i64| -> Bytes {
        Record::new("/feed/topic", value, peer(kp))
            .with_time_received(at(secs))
            .encode_signed(kp)
            .unwrap()
            .1
            .into()
    };

    let candidates = vec![
        dated(&parties[0], "first", 100),
        dated(&parties[1], "third", 300),
        // Newest, but unsigned
        Record::new("/feed/topic", "fourth", peer(&parties[2]))
            .with_time_received(at(400))
            .encode()
            .unwrap()
            .into(),
        dated(&parties[2], "second", 200),
    ];

    let resolution = feed_resolver(&parties)
        .resolve(b"/feed/topic", &candidates)
        .unwrap();

    assert_eq!(resolution.index, 1);
    assert_eq!(resolution.record.value().as_ref(), b"third");
    resolution
        .record
        .verify_signature(&parties[1].public_key())
        .unwrap();
    assert!(matches!(
        resolution.rejected.as_slice(),
        [(2, ResolveError::MissingSignature)]
    ));
}

#[test]
fn test_forged_signature_cannot_win_feed() {
    init_tracing();
    let honest = Keypair::from_seed(&[0x01; 32]);
    let at = |secs| Utc.timestamp_opt(secs, 0).unwrap();

    let (_, genuine) = Record::new("/feed/t", "honest", peer(&honest))
        .with_time_received(at(100))
        .encode_signed(&honest)
        .unwrap();

    // Newer entry claiming the honest author, with junk in the signature field
    let mut proto = Record::new("/feed/t", "attacker", peer(&honest))
        .with_time_received(at(999))
        .to_proto();
    proto.signature = Some(vec![0]);
    let forged = proto.encode_to_bytes().unwrap();

    // Same, but from an author nobody has a key for
    let stranger = Keypair::from_seed(&[0x66; 32]);
    let (_, unknown) = Record::new("/feed/t", "stranger", peer(&stranger))
        .with_time_received(at(500))
        .encode_signed(&stranger)
        .unwrap();

    let candidates: Vec<Bytes> = vec![genuine.into(), forged.into(), unknown.into()];
    let resolution = feed_resolver(std::slice::from_ref(&honest))
        .resolve(b"/feed/t", &candidates)
        .unwrap();

    assert_eq!(resolution.index, 0);
    assert_eq!(resolution.record.value().as_ref(), b"honest");
    assert!(matches!(
        resolution.rejected.as_slice(),
        [
            (1, ResolveError::Record(RecordError::InvalidSignature)),
            (2, ResolveError::UnknownAuthor(_)),
        ]
    ));
}

#[test]
fn test_resolve_unnamespaced_key() {
    let kp = Keypair::from_seed(&[0x55; 32]);
    let candidates: Vec<Bytes> = vec![Record::new("hello", "world", peer(&kp))
        .encode()
        .unwrap()
        .into()];

    let resolver = Resolver::new(
        Arc::new(ValidatorRegistry::with_defaults()),
        Arc::new(SelectorRegistry::default()),
        ResolverConfig::default(),
    );

    // Validation passes without a namespace; selection cannot.
    assert!(matches!(
        resolver.resolve(b"hello", &candidates),
        Err(ResolveError::Selection(SelectionError::UnnamespacedKey))
    ));
}

// ============================================================================
// Interop
// ============================================================================

// Golden encoding of the signed hello/world record for seed 0x42..;
// reproducible by any RFC 8032 Ed25519 and sha2-256 implementation.
const SIGNED_HELLO_WORLD: &str = concat!(
    "0a0568656c6c6f",
    "1205776f726c64",
    "1a221220caf3df3522551fbb839d51c8e01080e8cce9bd26ed044f3fbda1f6733aa3e687",
    "224033cd76ea7e160ddb40ff5c32166f875937145ed8c0c442836e2d4aab8ed119b7",
    "5022d6dca525321afd02f78b8b54e8138b8e48c514a38f9fc4a0d39118cf290c",
);

#[test]
fn test_interop_signed_record() {
    let kp = Keypair::from_seed(&[0x42; 32]);
    let raw = hex::decode(SIGNED_HELLO_WORLD).unwrap();

    let record = Record::decode(&raw).unwrap();
    assert_eq!(record.key().as_ref(), b"hello");
    assert_eq!(record.value().as_ref(), b"world");
    assert_eq!(record.author(), &peer(&kp));
    record.verify_signature(&kp.public_key()).unwrap();

    let (_, ours) = Record::new("hello", "world", peer(&kp))
        .encode_signed(&kp)
        .unwrap();
    assert_eq!(ours, raw);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_unnamespaced_keys_pass(
        k in "[a-z0-9]{0,16}(/[a-z0-9]{0,16})?",
        v in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        prop_assume!(key::namespace(k.as_bytes()).is_none());
        let record = Record::new(k, v, PeerId::default());
        prop_assert!(ValidatorRegistry::new().verify_record(&record).is_ok());
    }

    #[test]
    fn prop_pk_validation_total(
        k in prop::collection::vec(any::<u8>(), 0..64),
        v in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut full = b"/pk/".to_vec();
        full.extend(k);
        let record = Record::new(full, v, PeerId::default());
        // Any outcome is fine; it must not panic.
        let _ = ValidatorRegistry::with_defaults().verify_record(&record);
    }

    #[test]
    fn prop_pk_records_always_validate(seed in any::<[u8; 32]>()) {
        let record = public_key_record(&Keypair::from_seed(&seed).public_key());
        prop_assert!(ValidatorRegistry::with_defaults().verify_record(&record).is_ok());
    }
}
