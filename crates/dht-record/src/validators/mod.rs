//! Built-in namespace validators.

mod ipns;
mod public_key;

pub use ipns::{ExternalRecordValidator, IpnsValidator};
pub use public_key::{public_key_record, public_key_record_key, PublicKeyValidator};
