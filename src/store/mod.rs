//! Coordination-service clients and connection setup.
//!
//! This module provides:
//! - The `CoordinationClient` read contract used by the reader
//! - The `Connector` contract used to open a session
//! - `connect_with_retry`, the single place where backoff is applied
//!
//! Backend-specific code lives in dedicated submodules. The rest of
//! the crate interacts exclusively through the traits below.

#[cfg(test)]
pub mod memory;
pub mod zookeeper;

use std::sync::Arc;

use log::{info, warn};
use tokio::time::sleep;

use crate::error::{MetadataError, StoreError, StoreResult};
use crate::retry::RetryPolicy;

/// Read-only view of a hierarchical key-value store.
///
/// THREAD SAFETY:
/// - Must be Send + Sync
/// - One client is shared by every lookup of a collector
#[async_trait::async_trait]
pub trait CoordinationClient: Send + Sync {
    /// Returns whether a node exists at `path`.
    async fn exists(&self, path: &str) -> StoreResult<bool>;

    /// Returns the raw content of the node at `path`.
    ///
    /// Reading a missing node is an error, not an empty value.
    async fn get_data(&self, path: &str) -> StoreResult<Vec<u8>>;
}

/// Opens sessions against one kind of backend.
#[async_trait::async_trait]
pub trait Connector: Send + Sync {
    /// Backend name, used for logging.
    fn name(&self) -> &'static str;

    /// Makes a single connection attempt.
    async fn connect(&self, address: &str) -> StoreResult<Arc<dyn CoordinationClient>>;
}

/// Connects to `address`, retrying with backoff until the policy's
/// budget is spent.
///
/// GUARANTEES:
/// - At most `policy.max_attempts()` calls to `connector.connect`
/// - The last connection error is returned inside
///   `MetadataError::Connection`
pub async fn connect_with_retry(
    connector: &dyn Connector,
    address: &str,
    policy: &RetryPolicy,
) -> Result<Arc<dyn CoordinationClient>, MetadataError> {
    let mut retry = 0;

    loop {
        match connector.connect(address).await {
            Ok(client) => {
                info!("Connected to {} at {}", connector.name(), address);
                return Ok(client);
            }

            Err(e) => match policy.delay_for(retry) {
                Some(delay) => {
                    warn!(
                        "{} connect to {} failed ({}), retry {}/{} in {:?}",
                        connector.name(),
                        address,
                        e,
                        retry + 1,
                        policy.max_retries,
                        delay
                    );
                    sleep(delay).await;
                    retry += 1;
                }
                None => {
                    return Err(MetadataError::Connection {
                        address: address.to_string(),
                        attempts: retry + 1,
                        source: e,
                    });
                }
            },
        }
    }
}

/// Convenience for backends that cannot produce a richer error.
#[cfg(test)]
pub(crate) fn unavailable(msg: impl Into<String>) -> StoreError {
    StoreError::Unavailable(msg.into())
}
