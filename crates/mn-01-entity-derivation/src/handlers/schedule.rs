//! # Schedule Service Handlers

use shared_types::{Entity, EntityId, EntityType, RecordItem, Schedule, Transaction, TransactionType};

use super::{HandlerContext, TransactionHandler};
use crate::domain::Result;

pub struct ScheduleCreateHandler;

impl TransactionHandler for ScheduleCreateHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ScheduleCreate
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        Ok(item.record.receipt.schedule_id.unwrap_or(EntityId::EMPTY))
    }

    /// The schedule row keeps the inner transaction bytes; the payer falls
    /// back to the creator when the body names none or it cannot be resolved.
    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !item.is_successful() || !ctx.persist().schedules {
            return Ok(());
        }
        let body = expect_body!(item, ScheduleCreate, self.transaction_type());
        let Some(schedule_id) = transaction.entity_id.filter(|id| !id.is_empty()) else {
            return Ok(());
        };

        let payer = match &body.payer {
            Some(payer) => ctx.lookup_account_or_log(payer, "schedule_payer")?,
            None => None,
        };
        let payer = payer
            .filter(|id| !id.is_empty())
            .unwrap_or(item.payer_account_id);
        ctx.add_entity_id(payer);

        ctx.listener.on_schedule(Schedule {
            schedule_id,
            consensus_timestamp: Some(item.consensus_timestamp),
            creator_account_id: Some(item.payer_account_id),
            payer_account_id: Some(payer),
            transaction_body: Some(body.scheduled_transaction_body.clone()),
            executed_timestamp: None,
            expiration_time: body.expiration_time,
            wait_for_expiry: Some(body.wait_for_expiry),
        })?;
        Ok(())
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        item: &RecordItem,
    ) -> Result<()> {
        let body = expect_body!(item, ScheduleCreate, self.transaction_type());
        entity.entity_type = Some(EntityType::Schedule);
        entity.expiration_timestamp = body.expiration_time;
        entity.key = body.admin_key.clone();
        entity.memo = Some(body.memo.clone());
        ctx.listener.on_entity(entity)?;
        Ok(())
    }
}

pub struct ScheduleDeleteHandler;

impl TransactionHandler for ScheduleDeleteHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ScheduleDelete
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, ScheduleDelete, self.transaction_type());
        Ok(body.schedule_id)
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        _item: &RecordItem,
    ) -> Result<()> {
        entity.entity_type = Some(EntityType::Schedule);
        ctx.listener.on_entity(entity)?;
        Ok(())
    }
}

pub struct ScheduleSignHandler;

impl TransactionHandler for ScheduleSignHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ScheduleSign
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, ScheduleSign, self.transaction_type());
        Ok(body.schedule_id)
    }
}

/// Executed-timestamp update for the schedule a scheduled transaction ran
/// from.
pub fn emit_executed_schedule(ctx: &mut HandlerContext<'_>, item: &RecordItem) -> Result<()> {
    let Some(schedule_id) = item.record.schedule_ref else {
        return Ok(());
    };
    if !item.is_successful() || !ctx.persist().schedules || schedule_id.is_empty() {
        return Ok(());
    }
    ctx.add_entity_id(schedule_id);
    ctx.listener.on_schedule(Schedule {
        schedule_id,
        executed_timestamp: Some(item.consensus_timestamp),
        ..Default::default()
    })?;
    Ok(())
}
