use std::sync::Arc;

use log::{debug, info};

use super::MetaDataCollector;
use crate::descriptor::ConnectionDescriptor;
use crate::error::MetadataError;
use crate::identifier::{KeyType, MetadataIdentifier};
use crate::path::{RootNamespace, build_path, resolve_root};
use crate::reader::{MetadataLookup, read_metadata};
use crate::retry::RetryPolicy;
use crate::store::{CoordinationClient, Connector, connect_with_retry};

/// Started ZooKeeper-backed collector.
///
/// Node layout:
///     {root}/metadata/{interface}/[{version}/][{group}/]{side}/{application}
///
/// Provider and consumer lookups share the node path scheme; the side
/// is only distinguished through the identifier itself.
pub struct ZookeeperMetaDataCollector {
    descriptor: ConnectionDescriptor,
    root: RootNamespace,
    client: Arc<dyn CoordinationClient>,
}

impl ZookeeperMetaDataCollector {
    /// Resolves the root namespace and opens the session.
    ///
    /// Blocks until connected or until `retry` is exhausted; the
    /// connection error is returned to the caller unchanged.
    pub async fn start(
        descriptor: ConnectionDescriptor,
        connector: &dyn Connector,
        retry: &RetryPolicy,
    ) -> Result<Self, MetadataError> {
        let root = resolve_root(&descriptor);
        let client = connect_with_retry(connector, &descriptor.connect_address(), retry).await?;

        info!("ZooKeeper metadata collector ready, root {}", root);

        Ok(Self {
            descriptor,
            root,
            client,
        })
    }

    pub fn root(&self) -> &RootNamespace {
        &self.root
    }

    pub fn node_path(&self, identifier: &MetadataIdentifier) -> String {
        build_path(&self.root, &identifier.unique_key(KeyType::Path))
    }

    async fn get_metadata(&self, identifier: &MetadataIdentifier) -> MetadataLookup {
        let path = self.node_path(identifier);
        debug!("Looking up {} metadata at {}", identifier.side, path);
        read_metadata(self.client.as_ref(), &path).await
    }
}

#[async_trait::async_trait]
impl MetaDataCollector for ZookeeperMetaDataCollector {
    fn name(&self) -> &'static str {
        "zookeeper"
    }

    fn descriptor(&self) -> &ConnectionDescriptor {
        &self.descriptor
    }

    async fn lookup_provider_metadata(&self, identifier: &MetadataIdentifier) -> MetadataLookup {
        self.get_metadata(identifier).await
    }

    async fn lookup_consumer_metadata(&self, identifier: &MetadataIdentifier) -> MetadataLookup {
        self.get_metadata(identifier).await
    }
}
