//! Namespace selectors and their registry.
//!
//! When several peers return different records for one key, the namespace
//! selector picks the authoritative one. Selectors must be deterministic so
//! that every peer picks the same record from the same candidates.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::error::SelectionError;
use crate::key;
use crate::selectors::{IpnsSelector, PublicKeySelector};

/// Namespace-specific choice among candidate records.
pub trait Selector: Send + Sync {
    /// Index into `records` of the best record. `records` is never empty.
    fn select(&self, key: &[u8], records: &[Bytes]) -> usize;
}

impl<F> Selector for F
where
    F: Fn(&[u8], &[Bytes]) -> usize + Send + Sync,
{
    fn select(&self, key: &[u8], records: &[Bytes]) -> usize {
        self(key, records)
    }
}

/// Selectors keyed by namespace name.
#[derive(Clone)]
pub struct SelectorRegistry {
    selectors: HashMap<String, Arc<dyn Selector>>,
}

impl SelectorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            selectors: HashMap::new(),
        }
    }

    /// Add or replace the selector for `namespace`.
    pub fn register(
        mut self,
        namespace: impl Into<String>,
        selector: impl Selector + 'static,
    ) -> Self {
        self.selectors.insert(namespace.into(), Arc::new(selector));
        self
    }

    /// Look up the selector for `namespace`.
    pub fn get(&self, namespace: &str) -> Option<&dyn Selector> {
        self.selectors.get(namespace).map(|s| s.as_ref())
    }

    /// Registered namespace names, in no particular order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.selectors.keys().map(String::as_str)
    }

    /// Index of the best of `records` for `key`.
    ///
    /// Unlike validation, selection requires a namespace. The namespace
    /// selector's answer is returned unmodified.
    pub fn best_record(&self, key: &[u8], records: &[Bytes]) -> Result<usize, SelectionError> {
        if records.is_empty() {
            return Err(SelectionError::NoRecordsProvided);
        }

        let namespace = key::namespace(key).ok_or_else(|| {
            debug!(key = %key::display(key), "cannot select without a namespace");
            SelectionError::UnnamespacedKey
        })?;

        let selector = self
            .get(&namespace)
            .ok_or_else(|| SelectionError::UnknownNamespace(namespace.to_string()))?;

        let index = selector.select(key, records);
        trace!(namespace = %namespace, candidates = records.len(), index, "selected record");
        Ok(index)
    }
}

impl Default for SelectorRegistry {
    /// Built-in selectors for `pk` and `ipns`.
    fn default() -> Self {
        Self::new()
            .register(PublicKeySelector::NAMESPACE, PublicKeySelector)
            .register(IpnsSelector::NAMESPACE, IpnsSelector)
    }
}

impl fmt::Debug for SelectorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.namespaces().collect();
        names.sort_unstable();
        f.debug_struct("SelectorRegistry")
            .field("namespaces", &names)
            .finish()
    }
}
