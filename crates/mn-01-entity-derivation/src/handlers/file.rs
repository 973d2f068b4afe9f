//! # File Service Handlers
//!
//! File lifecycle and content. File contents are emitted as [`FileData`]
//! when `persist.files` is on, or for system files when
//! `persist.system_files` is on.

use shared_types::{
    Entity, EntityId, EntityType, FileData, RecordItem, SystemTarget, Transaction,
    TransactionType,
};

use super::{HandlerContext, TransactionHandler};
use crate::domain::Result;

/// Highest entity number reserved for system files.
pub const MAX_SYSTEM_FILE_NUM: i64 = 1000;

fn persists_file_data(ctx: &HandlerContext<'_>, file_id: EntityId) -> bool {
    let persist = ctx.persist();
    persist.files || (persist.system_files && file_id.num <= MAX_SYSTEM_FILE_NUM)
}

fn emit_file_data(
    ctx: &mut HandlerContext<'_>,
    item: &RecordItem,
    file_id: Option<EntityId>,
    contents: &[u8],
) -> Result<()> {
    let Some(file_id) = file_id else {
        return Ok(());
    };
    if !item.is_successful() || !persists_file_data(ctx, file_id) {
        return Ok(());
    }
    ctx.listener.on_file_data(FileData {
        consensus_timestamp: item.consensus_timestamp,
        entity_id: file_id,
        file_data: contents.to_vec(),
        transaction_type: item.transaction_type(),
    })?;
    Ok(())
}

pub struct FileCreateHandler;

impl TransactionHandler for FileCreateHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::FileCreate
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        Ok(item.record.receipt.file_id.unwrap_or(EntityId::EMPTY))
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        let body = expect_body!(item, FileCreate, self.transaction_type());
        emit_file_data(ctx, item, transaction.entity_id, &body.contents)
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        item: &RecordItem,
    ) -> Result<()> {
        let body = expect_body!(item, FileCreate, self.transaction_type());
        entity.entity_type = Some(EntityType::File);
        entity.expiration_timestamp = body.expiration_time;
        entity.key = body.keys.clone();
        entity.memo = Some(body.memo.clone());
        ctx.listener.on_entity(entity)?;
        Ok(())
    }
}

pub struct FileAppendHandler;

impl TransactionHandler for FileAppendHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::FileAppend
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, FileAppend, self.transaction_type());
        Ok(body.file_id)
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        let body = expect_body!(item, FileAppend, self.transaction_type());
        emit_file_data(ctx, item, transaction.entity_id, &body.contents)
    }
}

pub struct FileUpdateHandler;

impl TransactionHandler for FileUpdateHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::FileUpdate
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, FileUpdate, self.transaction_type());
        Ok(body.file_id)
    }

    /// An update without contents leaves the stored data alone.
    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        let body = expect_body!(item, FileUpdate, self.transaction_type());
        if body.contents.is_empty() {
            return Ok(());
        }
        emit_file_data(ctx, item, transaction.entity_id, &body.contents)
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        item: &RecordItem,
    ) -> Result<()> {
        let body = expect_body!(item, FileUpdate, self.transaction_type());
        entity.entity_type = Some(EntityType::File);
        entity.expiration_timestamp = body.expiration_time;
        entity.key = body.keys.clone();
        entity.memo = body.memo.clone();
        ctx.listener.on_entity(entity)?;
        Ok(())
    }
}

pub struct FileDeleteHandler;

impl TransactionHandler for FileDeleteHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::FileDelete
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, FileDelete, self.transaction_type());
        Ok(body.file_id)
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        _item: &RecordItem,
    ) -> Result<()> {
        entity.entity_type = Some(EntityType::File);
        ctx.listener.on_entity(entity)?;
        Ok(())
    }
}

/// A system delete/undelete targets either a file or a contract.
fn target_id(ctx: &HandlerContext<'_>, target: Option<&SystemTarget>) -> Result<EntityId> {
    match target {
        Some(SystemTarget::File(file_id)) => Ok(*file_id),
        Some(SystemTarget::Contract(contract_id)) => ctx.resolve_contract(contract_id),
        None => Ok(EntityId::EMPTY),
    }
}

fn target_type(target: Option<&SystemTarget>) -> Option<EntityType> {
    match target {
        Some(SystemTarget::File(_)) => Some(EntityType::File),
        Some(SystemTarget::Contract(_)) => Some(EntityType::Contract),
        None => None,
    }
}

pub struct SystemDeleteHandler;

impl TransactionHandler for SystemDeleteHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::SystemDelete
    }

    fn entity_id(&self, ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, SystemDelete, self.transaction_type());
        target_id(ctx, body.target.as_ref())
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        item: &RecordItem,
    ) -> Result<()> {
        let body = expect_body!(item, SystemDelete, self.transaction_type());
        entity.entity_type = target_type(body.target.as_ref());
        ctx.listener.on_entity(entity)?;
        Ok(())
    }
}

pub struct SystemUndeleteHandler;

impl TransactionHandler for SystemUndeleteHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::SystemUndelete
    }

    fn entity_id(&self, ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, SystemUndelete, self.transaction_type());
        target_id(ctx, body.target.as_ref())
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        item: &RecordItem,
    ) -> Result<()> {
        let body = expect_body!(item, SystemUndelete, self.transaction_type());
        entity.entity_type = target_type(body.target.as_ref());
        ctx.listener.on_entity(entity)?;
        Ok(())
    }
}
