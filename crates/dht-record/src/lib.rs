//! # DHT Record
//!
//! Namespace policy for DHT records: which values are acceptable under a
//! key, and which of several competing records wins.
//!
//! ## Overview
//!
//! - **Validators**: Per-namespace checks on a key/value pair
//! - **Selectors**: Per-namespace choice among candidate records
//! - **Resolver**: Validation and selection over records gathered from peers
//!
//! Keys have the shape `/<namespace>/<id>`. Keys without a namespace pass
//! validation unchecked but cannot go through selection.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use dht_record::core::Keypair;
//! use dht_record::{
//!     public_key_record, Resolver, ResolverConfig, SelectorRegistry, ValidatorRegistry,
//! };
//!
//! let keypair = Keypair::generate();
//! let record = public_key_record(&keypair.public_key());
//!
//! let validators = ValidatorRegistry::with_defaults();
//! validators.verify_record(&record).unwrap();
//!
//! let resolver = Resolver::new(
//!     Arc::new(validators),
//!     Arc::new(SelectorRegistry::default()),
//!     ResolverConfig::default(),
//! );
//! let candidates: Vec<bytes::Bytes> = vec![record.encode().unwrap().into()];
//! let resolution = resolver.resolve(record.key(), &candidates).unwrap();
//! assert_eq!(resolution.index, 0);
//! ```
//!
//! ## Re-exports
//!
//! `dht_record::core` is the primitives crate (records, peer ids, keys).

pub mod error;
pub mod key;
pub mod resolver;
pub mod selector;
pub mod selectors;
pub mod validator;
pub mod validators;

pub use dht_record_core as core;

pub use error::{ResolveError, SelectionError, ValidationError};
pub use resolver::{AuthorKeys, KeyRing, Resolution, Resolver, ResolverConfig};
pub use selector::{Selector, SelectorRegistry};
pub use selectors::{IpnsSelector, LatestReceivedSelector, PublicKeySelector};
pub use validator::{Validator, ValidatorRegistry};
pub use validators::{
    public_key_record, public_key_record_key, ExternalRecordValidator, IpnsValidator,
    PublicKeyValidator,
};

pub use dht_record_core::{PeerId, Record, RecordError};
