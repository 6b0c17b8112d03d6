//! Namespace validators and their registry.
//!
//! A validator decides whether a value is acceptable content for a key in
//! its namespace. Registries are assembled once and then only read.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dht_record_core::Record;
use tracing::{debug, trace};

use crate::error::ValidationError;
use crate::key;
use crate::validators::{ExternalRecordValidator, IpnsValidator, PublicKeyValidator};

/// Namespace-specific record validation.
pub trait Validator: Send + Sync {
    /// Check `value` for `key`.
    fn validate(&self, key: &[u8], value: &[u8]) -> Result<(), ValidationError>;

    /// Whether records in this namespace must carry a signature.
    fn requires_signature(&self) -> bool {
        false
    }
}

impl<F> Validator for F
where
    F: Fn(&[u8], &[u8]) -> Result<(), ValidationError> + Send + Sync,
{
    fn validate(&self, key: &[u8], value: &[u8]) -> Result<(), ValidationError> {
        self(key, value)
    }
}

/// Validators keyed by namespace name.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Arc<dyn Validator>>,
}

impl ValidatorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in `pk` namespace.
    pub fn with_defaults() -> Self {
        Self::new().register(PublicKeyValidator::NAMESPACE, PublicKeyValidator::default())
    }

    /// Add or replace the validator for `namespace`.
    pub fn register(
        mut self,
        namespace: impl Into<String>,
        validator: impl Validator + 'static,
    ) -> Self {
        self.validators.insert(namespace.into(), Arc::new(validator));
        self
    }

    /// Register the `ipns` namespace backed by an external validator.
    pub fn with_ipns(self, external: impl ExternalRecordValidator + 'static) -> Self {
        self.register(IpnsValidator::NAMESPACE, IpnsValidator::new(external))
    }

    /// Look up the validator for `namespace`.
    pub fn get(&self, namespace: &str) -> Option<&dyn Validator> {
        self.validators.get(namespace).map(|v| v.as_ref())
    }

    /// Registered namespace names, in no particular order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }

    /// Validate `record` against the validator for its key's namespace.
    ///
    /// Keys without a namespace pass unchecked. The namespace validator's
    /// result is returned as is. Signatures are not checked here; callers
    /// that care consult [`is_signed`](Self::is_signed).
    pub fn verify_record(&self, record: &Record) -> Result<(), ValidationError> {
        let key = record.key();
        let Some(namespace) = key::namespace(key) else {
            trace!(key = %key::display(key), "no namespace, skipping validation");
            return Ok(());
        };

        let validator = self.get(&namespace).ok_or_else(|| {
            debug!(namespace = %namespace, "no validator registered");
            ValidationError::UnknownNamespace(namespace.to_string())
        })?;

        trace!(namespace = %namespace, "validating record");
        validator.validate(key, record.value()).map_err(|e| {
            debug!(namespace = %namespace, error = %e, "record failed validation");
            e
        })
    }

    /// Whether records under `key` must be signed.
    ///
    /// Unnamespaced keys never require a signature. An unregistered
    /// namespace is an error, not a `false`.
    pub fn is_signed(&self, key: &[u8]) -> Result<bool, ValidationError> {
        let Some(namespace) = key::namespace(key) else {
            return Ok(false);
        };

        self.get(&namespace)
            .map(|v| v.requires_signature())
            .ok_or_else(|| ValidationError::UnknownNamespace(namespace.into_owned()))
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.namespaces().collect();
        names.sort_unstable();
        f.debug_struct("ValidatorRegistry")
            .field("namespaces", &names)
            .finish()
    }
}
