//! Selector for `/pk/` records.

use bytes::Bytes;

use crate::selector::Selector;

/// Picks the first candidate.
///
/// A valid `pk` record's value is fixed by the hash in its key, so every
/// candidate that passed validation carries the same public key.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicKeySelector;

impl PublicKeySelector {
    pub const NAMESPACE: &'static str = "pk";
}

impl Selector for PublicKeySelector {
    fn select(&self, _key: &[u8], _records: &[Bytes]) -> usize {
        0
    }
}
