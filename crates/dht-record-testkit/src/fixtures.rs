//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use dht_record::{
    public_key_record, Resolver, ResolverConfig, SelectorRegistry, ValidatorRegistry,
};
use dht_record_core::{Ed25519PublicKey, Keypair, PeerId, Record};

/// A test fixture with a keypair and its peer id.
pub struct TestFixture {
    pub keypair: Keypair,
    pub peer_id: PeerId,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self::from_keypair(Keypair::generate())
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::from_keypair(Keypair::from_seed(&seed))
    }

    fn from_keypair(keypair: Keypair) -> Self {
        let peer_id = PeerId::from_public_key(&keypair.public_key());
        Self { keypair, peer_id }
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    /// The `/pk/` record publishing this fixture's key.
    pub fn pk_record(&self) -> Record {
        public_key_record(&self.public_key())
    }

    /// An unsigned record authored by this fixture.
    pub fn make_record(&self, key: &[u8], value: &[u8]) -> Record {
        Record::new(key.to_vec(), value.to_vec(), self.peer_id.clone())
    }

    /// A signed record authored by this fixture.
    pub fn make_signed(&self, key: &[u8], value: &[u8]) -> Record {
        self.make_record(key, value)
            .sign(&self.keypair)
            .expect("ed25519 signing cannot fail")
    }

    /// A signed record stamped with `received`.
    pub fn make_dated(&self, key: &[u8], value: &[u8], received: DateTime<Utc>) -> Record {
        self.make_record(key, value)
            .with_time_received(received)
            .sign(&self.keypair)
            .expect("ed25519 signing cannot fail")
    }

    /// Encode `record` as a resolver candidate.
    pub fn encode(record: &Record) -> Bytes {
        record.encode().expect("record encoding cannot fail").into()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            TestFixture::with_seed(seed)
        })
        .collect()
}

/// A resolver over the built-in registries with the default config.
pub fn default_resolver() -> Resolver {
    Resolver::new(
        Arc::new(ValidatorRegistry::with_defaults()),
        Arc::new(SelectorRegistry::default()),
        ResolverConfig::default(),
    )
}
