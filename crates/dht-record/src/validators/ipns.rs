//! The `ipns` namespace.
//!
//! Name records are checked by a validator owned by the naming layer. This
//! namespace only enforces the key shape before handing off.

use std::error::Error;
use std::sync::Arc;

use crate::error::ValidationError;
use crate::validator::Validator;

const PREFIX: &[u8] = b"/ipns/";

/// Record validation implemented outside this crate.
pub trait ExternalRecordValidator: Send + Sync {
    fn validate(&self, key: &[u8], value: &[u8]) -> Result<(), Box<dyn Error + Send + Sync>>;
}

impl<F> ExternalRecordValidator for F
where
    F: Fn(&[u8], &[u8]) -> Result<(), Box<dyn Error + Send + Sync>> + Send + Sync,
{
    fn validate(&self, key: &[u8], value: &[u8]) -> Result<(), Box<dyn Error + Send + Sync>> {
        self(key, value)
    }
}

/// Validator for `/ipns/` records.
#[derive(Clone)]
pub struct IpnsValidator {
    external: Arc<dyn ExternalRecordValidator>,
}

impl IpnsValidator {
    pub const NAMESPACE: &'static str = "ipns";

    /// Shortest acceptable key: the prefix plus one id byte.
    pub const MIN_KEY_LEN: usize = PREFIX.len() + 1;

    pub fn new(external: impl ExternalRecordValidator + 'static) -> Self {
        Self {
            external: Arc::new(external),
        }
    }
}

impl Validator for IpnsValidator {
    fn validate(&self, key: &[u8], value: &[u8]) -> Result<(), ValidationError> {
        // The id after the prefix is a raw multihash, so the key is not
        // required to be UTF-8.
        if key.len() < Self::MIN_KEY_LEN {
            return Err(ValidationError::MalformedRecordKey(
                "invalid ipns record".into(),
            ));
        }

        if !key.starts_with(PREFIX) {
            return Err(ValidationError::MalformedRecordKey(
                "key was not prefixed with /ipns/".into(),
            ));
        }

        self.external
            .validate(key, value)
            .map_err(|source| ValidationError::Rejected {
                namespace: Self::NAMESPACE.to_string(),
                source,
            })
    }
}

impl std::fmt::Debug for IpnsValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IpnsValidator").finish_non_exhaustive()
    }
}
