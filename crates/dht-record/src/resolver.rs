//! The Resolver: validation and selection over one key's candidates.
//!
//! Candidates arrive as encoded records collected from several peers. Each
//! is checked in isolation; failures are recorded and skipped, and the
//! survivors go to the namespace selector.
//!
//! In namespaces that require signatures, a candidate survives only if its
//! signature verifies against its author's public key. Keys come from an
//! [`AuthorKeys`] source; without one, every signed candidate in such a
//! namespace is rejected.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use dht_record_core::{PeerId, PublicKey, Record};
use tracing::{debug, trace, warn};

use crate::error::{ResolveError, SelectionError};
use crate::key;
use crate::selector::SelectorRegistry;
use crate::validator::ValidatorRegistry;

/// Configuration for the Resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Run the namespace validator on each candidate.
    pub validate_candidates: bool,
    /// In namespaces that require signatures, drop candidates whose
    /// signature is missing or does not verify against the author's key.
    pub verify_signatures: bool,
    /// Drop candidates whose record key differs from the requested key.
    pub require_matching_key: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            validate_candidates: true,
            verify_signatures: true,
            require_matching_key: true,
        }
    }
}

/// Outcome of a successful resolution.
#[derive(Debug)]
pub struct Resolution {
    /// Index of the winner in the caller's candidate list.
    pub index: usize,
    /// The decoded winning record.
    pub record: Record,
    /// Candidates that were discarded, with the reason.
    pub rejected: Vec<(usize, ResolveError)>,
}

/// Lookup of the public key behind a record author.
pub trait AuthorKeys: Send + Sync {
    fn public_key(&self, author: &PeerId) -> Option<Arc<dyn PublicKey>>;
}

impl<F> AuthorKeys for F
where
    F: Fn(&PeerId) -> Option<Arc<dyn PublicKey>> + Send + Sync,
{
    fn public_key(&self, author: &PeerId) -> Option<Arc<dyn PublicKey>> {
        self(author)
    }
}

/// Known public keys, indexed by the peer id derived from each.
#[derive(Clone, Default)]
pub struct KeyRing {
    keys: HashMap<PeerId, Arc<dyn PublicKey>>,
}

impl KeyRing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key` under its derived peer id.
    pub fn with_key(mut self, key: impl PublicKey + 'static) -> Self {
        self.insert(key);
        self
    }

    pub fn insert(&mut self, key: impl PublicKey + 'static) -> PeerId {
        let id = PeerId::from_public_key(&key);
        self.keys.insert(id.clone(), Arc::new(key));
        id
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl AuthorKeys for KeyRing {
    fn public_key(&self, author: &PeerId) -> Option<Arc<dyn PublicKey>> {
        self.keys.get(author).cloned()
    }
}

impl fmt::Debug for KeyRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.keys.keys().collect();
        ids.sort_unstable();
        f.debug_struct("KeyRing").field("authors", &ids).finish()
    }
}

/// Picks the authoritative record for a key.
///
/// Cheap to clone; registries are shared.
#[derive(Clone)]
pub struct Resolver {
    validators: Arc<ValidatorRegistry>,
    selectors: Arc<SelectorRegistry>,
    author_keys: Option<Arc<dyn AuthorKeys>>,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(
        validators: Arc<ValidatorRegistry>,
        selectors: Arc<SelectorRegistry>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            validators,
            selectors,
            author_keys: None,
            config,
        }
    }

    /// Verify signatures against keys from `keys`.
    pub fn with_author_keys(mut self, keys: impl AuthorKeys + 'static) -> Self {
        self.author_keys = Some(Arc::new(keys));
        self
    }

    pub fn validators(&self) -> &ValidatorRegistry {
        &self.validators
    }

    pub fn selectors(&self) -> &SelectorRegistry {
        &self.selectors
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `candidates` for `key`.
    ///
    /// Fails only if no candidate survives or selection itself fails.
    pub fn resolve(&self, key: &[u8], candidates: &[Bytes]) -> Result<Resolution, ResolveError> {
        let mut survivors = Vec::with_capacity(candidates.len());
        let mut rejected = Vec::new();

        for (index, raw) in candidates.iter().enumerate() {
            match self.check_candidate(key, raw) {
                Ok(record) => survivors.push((index, raw.clone(), record)),
                Err(e) => {
                    warn!(
                        key = %key::display(key),
                        index,
                        error = %e,
                        "discarding candidate record"
                    );
                    rejected.push((index, e));
                }
            }
        }

        if survivors.is_empty() {
            return Err(SelectionError::NoRecordsProvided.into());
        }

        let encoded: Vec<Bytes> = survivors.iter().map(|(_, raw, _)| raw.clone()).collect();
        let best = self.selectors.best_record(key, &encoded)?;

        if best >= survivors.len() {
            return Err(SelectionError::InvalidIndex {
                index: best,
                len: survivors.len(),
            }
            .into());
        }
        let (index, _, record) = survivors.swap_remove(best);

        debug!(
            key = %key::display(key),
            index,
            discarded = rejected.len(),
            "resolved record"
        );

        Ok(Resolution {
            index,
            record,
            rejected,
        })
    }

    fn check_candidate(&self, key: &[u8], raw: &[u8]) -> Result<Record, ResolveError> {
        let record = Record::decode(raw)?;

        if self.config.require_matching_key && record.key().as_ref() != key {
            return Err(ResolveError::KeyMismatch {
                expected: key::display(key),
                found: key::display(record.key()),
            });
        }

        if self.config.validate_candidates {
            self.validators.verify_record(&record)?;
        }

        if self.config.verify_signatures && self.validators.is_signed(record.key())? {
            self.check_signature(&record)?;
        }

        Ok(record)
    }

    fn check_signature(&self, record: &Record) -> Result<(), ResolveError> {
        if !record.is_signed() {
            return Err(ResolveError::MissingSignature);
        }

        let author = record.author();
        let public_key = self
            .author_keys
            .as_ref()
            .and_then(|keys| keys.public_key(author))
            .ok_or_else(|| ResolveError::UnknownAuthor(author.clone()))?;

        record.verify_signature(&*public_key)?;
        trace!(author = %author, "signature verified");
        Ok(())
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("validators", &self.validators)
            .field("selectors", &self.selectors)
            .field("author_keys", &self.author_keys.is_some())
            .field("config", &self.config)
            .finish()
    }
}
