//! # Address Book Handlers
//!
//! Consensus node create/update/delete. Nodes are keyed by node id rather
//! than by entity id, so these handlers carry no lifecycle entity and emit
//! [`Node`] rows directly when `persist.nodes` is on.

use shared_types::{Node, RecordItem, Transaction, TransactionType};

use super::{HandlerContext, TransactionHandler};
use crate::domain::Result;

fn persists_nodes(ctx: &HandlerContext<'_>, item: &RecordItem) -> bool {
    item.is_successful() && ctx.persist().nodes
}

pub struct NodeCreateHandler;

impl TransactionHandler for NodeCreateHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::NodeCreate
    }

    /// The assigned node id is only known from the receipt.
    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !persists_nodes(ctx, item) {
            return Ok(());
        }
        let body = expect_body!(item, NodeCreate, self.transaction_type());
        let Some(node_id) = item.record.receipt.node_id else {
            return Ok(());
        };

        let account_id = ctx.lookup_account_or_log(&body.account, "node_account")?;
        if let Some(account_id) = account_id {
            ctx.add_entity_id(account_id);
        }
        ctx.listener.on_node(Node {
            node_id,
            account_id,
            admin_key: body.admin_key.clone(),
            created_timestamp: Some(item.consensus_timestamp),
            decline_reward: Some(body.decline_reward),
            deleted: Some(false),
            description: Some(body.description.clone()),
            timestamp_lower: item.consensus_timestamp,
        })?;
        Ok(())
    }
}

pub struct NodeUpdateHandler;

impl TransactionHandler for NodeUpdateHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::NodeUpdate
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !persists_nodes(ctx, item) {
            return Ok(());
        }
        let body = expect_body!(item, NodeUpdate, self.transaction_type());

        let mut node = Node {
            node_id: body.node_id,
            admin_key: body.admin_key.clone(),
            decline_reward: body.decline_reward,
            deleted: Some(false),
            description: body.description.clone(),
            timestamp_lower: item.consensus_timestamp,
            ..Default::default()
        };
        if let Some(account) = &body.account {
            node.account_id = ctx.lookup_account_or_log(account, "node_account")?;
            if let Some(account_id) = node.account_id {
                ctx.add_entity_id(account_id);
            }
        }
        ctx.listener.on_node(node)?;
        Ok(())
    }
}

pub struct NodeDeleteHandler;

impl TransactionHandler for NodeDeleteHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::NodeDelete
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !persists_nodes(ctx, item) {
            return Ok(());
        }
        let body = expect_body!(item, NodeDelete, self.transaction_type());
        ctx.listener.on_node(Node {
            node_id: body.node_id,
            deleted: Some(true),
            timestamp_lower: item.consensus_timestamp,
            ..Default::default()
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::handlers::test_support::{record_item, Harness};
    use shared_types::{
        AccountId, EntityId, NodeCreateBody, NodeDeleteBody, NodeUpdateBody, ResponseCode,
        TransactionBody,
    };

    fn create_item() -> RecordItem {
        let mut item = record_item(
            100,
            TransactionBody::NodeCreate(NodeCreateBody {
                account: AccountId::num(800),
                description: "node 7".into(),
                admin_key: Some(vec![2; 4]),
                decline_reward: true,
            }),
        );
        item.record.receipt.node_id = Some(7);
        item
    }

    #[test]
    fn test_create_node() {
        let mut harness = Harness::new();
        let processed = harness.process(&create_item()).unwrap();

        let node = harness.listener.nodes()[0];
        assert_eq!(node.node_id, 7);
        assert_eq!(node.account_id, Some(EntityId::num(800)));
        assert_eq!(node.created_timestamp, Some(100));
        assert_eq!(node.deleted, Some(false));
        assert_eq!(node.decline_reward, Some(true));
        assert!(harness.listener.entities().is_empty());
        assert!(processed.entity_ids.contains(&EntityId::num(800)));
    }

    #[test]
    fn test_update_is_sparse() {
        let item = record_item(
            200,
            TransactionBody::NodeUpdate(NodeUpdateBody {
                node_id: 7,
                description: Some("renamed".into()),
                ..Default::default()
            }),
        );
        let mut harness = Harness::new();
        harness.process(&item).unwrap();

        let node = harness.listener.nodes()[0];
        assert_eq!(node.description.as_deref(), Some("renamed"));
        assert!(node.account_id.is_none());
        assert!(node.admin_key.is_none());
        assert!(node.created_timestamp.is_none());
    }

    #[test]
    fn test_delete_node() {
        let item = record_item(300, TransactionBody::NodeDelete(NodeDeleteBody { node_id: 7 }));
        let mut harness = Harness::new();
        harness.process(&item).unwrap();
        assert_eq!(harness.listener.nodes()[0].deleted, Some(true));
    }

    #[test]
    fn test_gated_and_failed() {
        let mut config = ParserConfig::default();
        config.persist.nodes = false;
        let mut harness = Harness::with_config(config);
        harness.process(&create_item()).unwrap();
        assert!(harness.listener.nodes().is_empty());

        let mut harness = Harness::new();
        harness
            .process(&create_item().with_status(ResponseCode::InvalidSignature))
            .unwrap();
        assert!(harness.listener.nodes().is_empty());
    }
}
