//! # DHT Record Testkit
//!
//! Testing utilities for DHT records.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Fixed encodings for cross-implementation verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use dht_record_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, hex) in verify_all_vectors() {
//!     assert!(matches, "{name}: {hex}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use dht_record_testkit::generators::{record_from_params, RecordParams};
//!
//! proptest! {
//!     #[test]
//!     fn encoding_is_deterministic(params: RecordParams) {
//!         let r1 = record_from_params(&params);
//!         let r2 = record_from_params(&params);
//!         prop_assert_eq!(r1.encode().unwrap(), r2.encode().unwrap());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use dht_record_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let record = fixture.make_signed(b"/app/doc", b"body");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{default_resolver, multi_party_fixtures, TestFixture};
pub use generators::{record_from_params, RecordParams};
pub use vectors::{all_vectors, record_from_vector, verify_all_vectors, GoldenVector};
