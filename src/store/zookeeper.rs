use std::sync::Arc;

use zookeeper_client as zk;

use super::{CoordinationClient, Connector};
use crate::error::{StoreError, StoreResult};

/// ZooKeeper session.
///
/// DESIGN:
/// - Read-only; no node is ever created, written or watched
/// - The session is closed when the last `Arc` holding it is dropped
pub struct ZookeeperClient {
    client: zk::Client,
}

#[async_trait::async_trait]
impl CoordinationClient for ZookeeperClient {
    async fn exists(&self, path: &str) -> StoreResult<bool> {
        let stat = self.client.check_stat(path).await?;
        Ok(stat.is_some())
    }

    async fn get_data(&self, path: &str) -> StoreResult<Vec<u8>> {
        match self.client.get_data(path).await {
            Ok((data, _stat)) => Ok(data),
            Err(zk::Error::NoNode) => Err(StoreError::Vanished(path.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

/// Opens ZooKeeper sessions.
///
/// `address` is a connect string: one or more comma-separated
/// `host:port` entries.
pub struct ZookeeperConnector;

#[async_trait::async_trait]
impl Connector for ZookeeperConnector {
    fn name(&self) -> &'static str {
        "zookeeper"
    }

    async fn connect(&self, address: &str) -> StoreResult<Arc<dyn CoordinationClient>> {
        let client = zk::Client::connect(address).await?;
        Ok(Arc::new(ZookeeperClient { client }))
    }
}
