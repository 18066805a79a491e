use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors surfaced to callers of the collector API.
///
/// Only initialization can fail. Lookups never return this type;
/// their faults are reported through `MetadataLookup::TransientError`.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The coordination service could not be reached within the
    /// retry budget.
    #[error("failed to connect to {address} after {attempts} attempts: {source}")]
    Connection {
        address: String,
        attempts: u32,
        #[source]
        source: StoreError,
    },

    #[error("invalid metadata report descriptor '{input}': {reason}")]
    InvalidDescriptor { input: String, reason: String },

    #[error("unsupported metadata report protocol: {0}")]
    UnsupportedProtocol(String),
}

/// Faults raised by a coordination-service client.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("zookeeper error: {0}")]
    Zookeeper(#[from] zookeeper_client::Error),

    #[error("node content is not valid UTF-8: {0}")]
    Decode(#[from] FromUtf8Error),

    #[error("node {0} disappeared between existence check and read")]
    Vanished(String),

    #[error("{0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
