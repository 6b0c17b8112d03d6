//! Error types for namespace validation and selection.

use dht_record_core::{PeerId, RecordError};
use thiserror::Error;

/// Errors raised while validating a record against its namespace.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The key names a namespace with no registered validator.
    #[error("invalid record keytype: unrecognized namespace {0:?}")]
    UnknownNamespace(String),

    /// The key fails the namespace's structural checks.
    #[error("malformed record key: {0}")]
    MalformedRecordKey(String),

    /// The value's content hash does not match the hash in the key.
    #[error("record value does not match the hash in its key")]
    RecordHashMismatch,

    /// A namespace validator owned by another component rejected the record.
    #[error("{namespace} record rejected: {source}")]
    Rejected {
        namespace: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Errors raised while picking the best of several records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no records given")]
    NoRecordsProvided,

    #[error("record key does not have a selector function")]
    UnnamespacedKey,

    #[error("unrecognized key prefix: {0}")]
    UnknownNamespace(String),

    /// The namespace selector answered with an index outside the candidates.
    #[error("selector returned index {index} for {len} records")]
    InvalidIndex { index: usize, len: usize },
}

/// Reasons the resolver discards a candidate or fails outright.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),

    /// The candidate was stored under a different key.
    #[error("candidate key {found:?} does not match requested key {expected:?}")]
    KeyMismatch { expected: String, found: String },

    /// The namespace requires signatures and the candidate has none.
    #[error("record in a signing namespace is unsigned")]
    MissingSignature,

    /// No public key is known for the candidate's author.
    #[error("no public key known for author {0}")]
    UnknownAuthor(PeerId),
}
