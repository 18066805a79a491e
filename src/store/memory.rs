use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{CoordinationClient, Connector, unavailable};
use crate::error::{StoreError, StoreResult};

/// Where an injected fault fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// `exists` fails
    OnExists,

    /// `exists` succeeds, `get_data` fails
    OnRead,
}

#[derive(Default)]
struct Inner {
    nodes: BTreeMap<String, Vec<u8>>,
    faults: HashMap<String, Fault>,
}

/// In-process node tree.
///
/// Cheap to clone; clones share the same nodes. Stands in for the
/// coordination service in tests, with per-path fault injection to
/// simulate session loss.
#[derive(Clone, Default)]
pub struct MemoryTree {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.inner.write().await.nodes.insert(path.into(), data.into());
    }

    pub async fn remove(&self, path: &str) -> Option<Vec<u8>> {
        self.inner.write().await.nodes.remove(path)
    }

    pub async fn inject_fault(&self, path: impl Into<String>, fault: Fault) {
        self.inner.write().await.faults.insert(path.into(), fault);
    }

    pub async fn clear_faults(&self) {
        self.inner.write().await.faults.clear();
    }
}

#[async_trait::async_trait]
impl CoordinationClient for MemoryTree {
    async fn exists(&self, path: &str) -> StoreResult<bool> {
        let inner = self.inner.read().await;
        if inner.faults.get(path) == Some(&Fault::OnExists) {
            return Err(unavailable(format!("session lost while checking {}", path)));
        }
        Ok(inner.nodes.contains_key(path))
    }

    async fn get_data(&self, path: &str) -> StoreResult<Vec<u8>> {
        let inner = self.inner.read().await;
        if inner.faults.contains_key(path) {
            return Err(unavailable(format!("session lost while reading {}", path)));
        }
        inner
            .nodes
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::Vanished(path.to_string()))
    }
}

/// Hands out the same shared tree for every connection.
pub struct MemoryConnector {
    tree: MemoryTree,
}

impl MemoryConnector {
    pub fn new(tree: MemoryTree) -> Self {
        Self { tree }
    }
}

#[async_trait::async_trait]
impl Connector for MemoryConnector {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn connect(&self, _address: &str) -> StoreResult<Arc<dyn CoordinationClient>> {
        Ok(Arc::new(self.tree.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_nodes() {
        let tree = MemoryTree::new();
        let other = tree.clone();

        tree.insert("/dubbo/a", "x").await;
        assert!(other.exists("/dubbo/a").await.unwrap());
        assert_eq!(other.get_data("/dubbo/a").await.unwrap(), b"x");

        other.remove("/dubbo/a").await;
        assert!(!tree.exists("/dubbo/a").await.unwrap());
    }

    #[tokio::test]
    async fn reading_missing_node_is_an_error() {
        let tree = MemoryTree::new();
        let err = tree.get_data("/nope").await.unwrap_err();
        assert!(matches!(err, StoreError::Vanished(p) if p == "/nope"));
    }

    #[tokio::test]
    async fn read_fault_passes_existence_check() {
        let tree = MemoryTree::new();
        tree.insert("/n", "v").await;
        tree.inject_fault("/n", Fault::OnRead).await;

        assert!(tree.exists("/n").await.unwrap());
        assert!(tree.get_data("/n").await.is_err());

        tree.clear_faults().await;
        assert_eq!(tree.get_data("/n").await.unwrap(), b"v");
    }
}
