//! # Consensus Service Handlers
//!
//! Topic lifecycle and submitted messages. Everything here is gated by
//! `persist.topics`.

use shared_types::{
    Entity, EntityId, EntityType, RecordItem, Topic, TopicMessage, Transaction, TransactionType,
};

use super::{HandlerContext, TransactionHandler};
use crate::domain::Result;

pub struct ConsensusCreateTopicHandler;

impl TransactionHandler for ConsensusCreateTopicHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ConsensusCreateTopic
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        Ok(item.record.receipt.topic_id.unwrap_or(EntityId::EMPTY))
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        item: &RecordItem,
    ) -> Result<()> {
        if !ctx.persist().topics {
            return Ok(());
        }
        let body = expect_body!(item, ConsensusCreateTopic, self.transaction_type());

        ctx.set_auto_renew_account(&mut entity, body.auto_renew_account.as_ref())?;
        entity.auto_renew_period = body.auto_renew_period;
        entity.entity_type = Some(EntityType::Topic);
        entity.key = body.admin_key.clone();
        entity.memo = Some(body.memo.clone());

        let topic = Topic {
            id: entity.id,
            admin_key: body.admin_key.clone(),
            submit_key: body.submit_key.clone(),
            created_timestamp: entity.created_timestamp,
            timestamp_lower: entity.timestamp_lower,
        };
        ctx.listener.on_entity(entity)?;
        ctx.listener.on_topic(topic)?;
        Ok(())
    }
}

pub struct ConsensusUpdateTopicHandler;

impl TransactionHandler for ConsensusUpdateTopicHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ConsensusUpdateTopic
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, ConsensusUpdateTopic, self.transaction_type());
        Ok(body.topic_id)
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        item: &RecordItem,
    ) -> Result<()> {
        if !ctx.persist().topics {
            return Ok(());
        }
        let body = expect_body!(item, ConsensusUpdateTopic, self.transaction_type());

        ctx.set_auto_renew_account(&mut entity, body.auto_renew_account.as_ref())?;
        entity.auto_renew_period = body.auto_renew_period;
        entity.entity_type = Some(EntityType::Topic);
        entity.expiration_timestamp = body.expiration_time;
        entity.key = body.admin_key.clone();
        entity.memo = body.memo.clone();

        let topic = Topic {
            id: entity.id,
            admin_key: body.admin_key.clone(),
            submit_key: body.submit_key.clone(),
            created_timestamp: None,
            timestamp_lower: entity.timestamp_lower,
        };
        ctx.listener.on_entity(entity)?;
        ctx.listener.on_topic(topic)?;
        Ok(())
    }
}

pub struct ConsensusDeleteTopicHandler;

impl TransactionHandler for ConsensusDeleteTopicHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ConsensusDeleteTopic
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, ConsensusDeleteTopic, self.transaction_type());
        Ok(body.topic_id)
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        _item: &RecordItem,
    ) -> Result<()> {
        if !ctx.persist().topics {
            return Ok(());
        }
        entity.entity_type = Some(EntityType::Topic);
        ctx.listener.on_entity(entity)?;
        Ok(())
    }
}

pub struct ConsensusSubmitMessageHandler;

impl TransactionHandler for ConsensusSubmitMessageHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ConsensusSubmitMessage
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, ConsensusSubmitMessage, self.transaction_type());
        Ok(body.topic_id)
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !item.is_successful() || !ctx.persist().topics {
            return Ok(());
        }
        let body = expect_body!(item, ConsensusSubmitMessage, self.transaction_type());
        let receipt = &item.record.receipt;

        let mut message = TopicMessage {
            consensus_timestamp: item.consensus_timestamp,
            topic_id: body.topic_id,
            message: body.message.clone(),
            running_hash: receipt.topic_running_hash.clone(),
            running_hash_version: receipt.topic_running_hash_version,
            sequence_number: receipt.topic_sequence_number,
            payer_account_id: item.payer_account_id,
            chunk_num: None,
            chunk_total: None,
            initial_transaction_valid_start: None,
            initial_transaction_payer: None,
            valid_start_timestamp: item.valid_start_ns,
        };
        if let Some(chunk) = &body.chunk_info {
            message.chunk_num = Some(chunk.number);
            message.chunk_total = Some(chunk.total);
            message.initial_transaction_payer = Some(chunk.initial_transaction_id.payer);
            message.initial_transaction_valid_start =
                Some(chunk.initial_transaction_id.valid_start_ns);
        }

        ctx.listener.on_topic_message(message)?;
        Ok(())
    }
}
