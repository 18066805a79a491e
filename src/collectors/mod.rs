//! Metadata collector contract, backends and registry
//!
//! This module provides:
//! - The `MetaDataCollector` trait every started backend implements
//! - `CollectorBuilder`, the only way to obtain a started collector
//!
//! A collector can only be looked up after `CollectorBuilder::init`
//! has resolved its root and opened its connection; the builder
//! itself exposes no lookup methods.

pub mod zookeeper;

use std::sync::Arc;

use log::info;

use crate::descriptor::ConnectionDescriptor;
use crate::error::MetadataError;
use crate::identifier::{MetadataIdentifier, Side};
use crate::reader::MetadataLookup;
use crate::retry::RetryPolicy;
use crate::store::Connector;
use crate::store::zookeeper::ZookeeperConnector;

use self::zookeeper::ZookeeperMetaDataCollector;

/// Backend-agnostic access to reported service metadata.
///
/// THREAD SAFETY:
/// - Must be Send + Sync
/// - A started collector is shared across tasks behind an `Arc`
///
/// There is no explicit close: the session ends when the last `Arc`
/// to the collector is dropped.
#[async_trait::async_trait]
pub trait MetaDataCollector: Send + Sync {
    /// Backend name, matching the descriptor protocol.
    fn name(&self) -> &'static str;

    /// Descriptor the collector was started with.
    fn descriptor(&self) -> &ConnectionDescriptor;

    async fn lookup_provider_metadata(&self, identifier: &MetadataIdentifier) -> MetadataLookup;

    async fn lookup_consumer_metadata(&self, identifier: &MetadataIdentifier) -> MetadataLookup;

    /// Provider metadata, with faults reported as absent.
    async fn provider_metadata(&self, identifier: &MetadataIdentifier) -> Option<String> {
        self.lookup_provider_metadata(identifier).await.into_option()
    }

    /// Consumer metadata, with faults reported as absent.
    async fn consumer_metadata(&self, identifier: &MetadataIdentifier) -> Option<String> {
        self.lookup_consumer_metadata(identifier).await.into_option()
    }

    /// Looks up metadata for the side named by the identifier.
    async fn lookup(&self, identifier: &MetadataIdentifier) -> MetadataLookup {
        match identifier.side {
            Side::Provider => self.lookup_provider_metadata(identifier).await,
            Side::Consumer => self.lookup_consumer_metadata(identifier).await,
        }
    }
}

/// Unstarted collector.
///
/// Holds the descriptor and connection settings until `init` turns
/// it into a started `MetaDataCollector`.
pub struct CollectorBuilder {
    descriptor: ConnectionDescriptor,
    retry: RetryPolicy,
    connector: Option<Arc<dyn Connector>>,
}

impl CollectorBuilder {
    pub fn new(descriptor: ConnectionDescriptor) -> Self {
        Self {
            descriptor,
            retry: RetryPolicy::default(),
            connector: None,
        }
    }

    /// Replaces the descriptor. No validation happens here.
    pub fn set_descriptor(&mut self, descriptor: ConnectionDescriptor) {
        self.descriptor = descriptor;
    }

    pub fn descriptor(&self) -> &ConnectionDescriptor {
        &self.descriptor
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Overrides the transport of the selected backend.
    ///
    /// The protocol still decides the key layout; only the way
    /// sessions are opened changes.
    pub fn with_connector(mut self, connector: Arc<dyn Connector>) -> Self {
        self.connector = Some(connector);
        self
    }

    /// Resolves the root, opens the session and starts the collector.
    ///
    /// ERRORS:
    /// - `UnsupportedProtocol` for anything but `zookeeper`
    /// - `Connection` once the retry budget is exhausted
    pub async fn init(self) -> Result<Arc<dyn MetaDataCollector>, MetadataError> {
        let Self {
            descriptor,
            retry,
            connector,
        } = self;

        info!("Starting metadata collector for {}", descriptor);

        match descriptor.protocol() {
            "zookeeper" => {
                let connector = connector.unwrap_or_else(|| Arc::new(ZookeeperConnector));
                let collector =
                    ZookeeperMetaDataCollector::start(descriptor, connector.as_ref(), &retry)
                        .await?;
                Ok(Arc::new(collector))
            }
            other => Err(MetadataError::UnsupportedProtocol(other.to_string())),
        }
    }
}
