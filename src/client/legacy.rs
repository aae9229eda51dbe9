//! Operations from the REST-era client API
//!
//! Node and index manipulation by reference has no Bolt equivalent. These
//! methods exist so code written against the older surface fails loudly with
//! [`NOT_VALID_FOR_BOLT`](crate::error::NOT_VALID_FOR_BOLT) instead of at
//! compile time in unrelated places.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::client::reference::{DeleteMode, IndexFor, NodeReference, RelationshipReference};
use crate::client::BoltGraphClient;
use crate::error::{GraphClientError, GraphClientResult};

fn not_valid_for_bolt<T>(operation: &str) -> GraphClientResult<T> {
    debug!("Rejected '{}': not available over Bolt", operation);
    Err(GraphClientError::NotValidForBolt)
}

impl BoltGraphClient {
    pub fn root_node(&self) -> GraphClientResult<NodeReference> {
        not_valid_for_bolt("root_node")
    }

    pub async fn create<T: Serialize + Sync + ?Sized>(&self, _node: &T) -> GraphClientResult<NodeReference> {
        not_valid_for_bolt("create")
    }

    pub async fn get<T: DeserializeOwned>(&self, _reference: &NodeReference) -> GraphClientResult<Option<T>> {
        not_valid_for_bolt("get")
    }

    pub async fn get_relationship<T: DeserializeOwned>(
        &self,
        _reference: &RelationshipReference<T>,
    ) -> GraphClientResult<Option<T>> {
        not_valid_for_bolt("get_relationship")
    }

    pub async fn update<T: Serialize + Sync + ?Sized>(&self, _reference: &NodeReference, _node: &T) -> GraphClientResult<()> {
        not_valid_for_bolt("update")
    }

    pub async fn delete(&self, _reference: &NodeReference, _mode: DeleteMode) -> GraphClientResult<()> {
        not_valid_for_bolt("delete")
    }

    pub async fn create_relationship(
        &self,
        _from: &NodeReference,
        _to: &NodeReference,
        _relationship_type: &str,
    ) -> GraphClientResult<RelationshipReference> {
        not_valid_for_bolt("create_relationship")
    }

    pub async fn delete_relationship<T>(&self, _reference: &RelationshipReference<T>) -> GraphClientResult<()> {
        not_valid_for_bolt("delete_relationship")
    }

    pub async fn create_index(&self, _name: &str, _kind: IndexFor) -> GraphClientResult<()> {
        not_valid_for_bolt("create_index")
    }

    pub async fn delete_index(&self, _name: &str, _kind: IndexFor) -> GraphClientResult<()> {
        not_valid_for_bolt("delete_index")
    }

    pub async fn check_index_exists(&self, _name: &str, _kind: IndexFor) -> GraphClientResult<bool> {
        not_valid_for_bolt("check_index_exists")
    }

    pub async fn reindex(&self, _reference: &NodeReference) -> GraphClientResult<()> {
        not_valid_for_bolt("reindex")
    }

    pub async fn lookup_index<T: DeserializeOwned>(
        &self,
        _name: &str,
        _kind: IndexFor,
        _key: &str,
        _value: &str,
    ) -> GraphClientResult<Vec<T>> {
        not_valid_for_bolt("lookup_index")
    }

    pub async fn shutdown_server(&self) -> GraphClientResult<()> {
        not_valid_for_bolt("shutdown_server")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NOT_VALID_FOR_BOLT;

    fn client() -> BoltGraphClient {
        BoltGraphClient::new("bolt://localhost").unwrap()
    }

    #[tokio::test]
    async fn test_index_operations_are_rejected() {
        let client = client();
        assert!(matches!(
            client.create_index("people", IndexFor::Node).await,
            Err(GraphClientError::NotValidForBolt)
        ));
        assert!(matches!(
            client.check_index_exists("people", IndexFor::Relationship).await,
            Err(GraphClientError::NotValidForBolt)
        ));
        let err = client
            .lookup_index::<String>("people", IndexFor::Node, "name", "Ada")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), NOT_VALID_FOR_BOLT);
    }

    #[tokio::test]
    async fn test_mutations_are_rejected() {
        let client = client();
        let node = NodeReference::new(1);
        assert!(client.update(&node, "x").await.is_err());
        assert!(client.delete(&node, DeleteMode::NodeAndRelationships).await.is_err());
        assert!(client.create_relationship(&node, &NodeReference::new(2), "KNOWS").await.is_err());
        assert!(client.delete_relationship(&RelationshipReference::<()>::new(3)).await.is_err());
        assert!(client.reindex(&node).await.is_err());
        assert!(client.shutdown_server().await.is_err());
        assert!(client.delete_index("people", IndexFor::Node).await.is_err());
    }
}
