//! # Transaction Handlers
//!
//! One handler per transaction kind. Every handler runs the same steps,
//! composed by [`process`]:
//!
//! ```text
//! add_common_entity_ids ──→ update_transaction ──→ build_entity ──→ update_entity
//!                                                   (lifecycle)      (if Some)
//! ```
//!
//! Handlers override only the steps they need. `update_entity` receives an
//! entity already stamped per the lifecycle rule of the handler's operation
//! and is only reached for successful transactions with a non-empty entity.

use shared_types::{Entity, EntityId, RecordItem, Transaction, TransactionType};

use crate::domain::{build_entity, EntityOperation, Result};

/// Bind the payload of the expected body variant or fail with
/// `ParserError::BodyMismatch`.
macro_rules! expect_body {
    ($item:expr, $variant:ident, $expected:expr) => {
        match &$item.body {
            ::shared_types::TransactionBody::$variant(body) => body,
            other => {
                return Err($crate::domain::ParserError::BodyMismatch {
                    expected: $expected,
                    actual: other.transaction_type(),
                })
            }
        }
    };
}

pub mod airdrop;
pub mod allowance;
pub mod consensus;
pub mod context;
pub mod contract;
pub mod crypto;
pub mod fees;
pub mod file;
pub mod network;
pub mod node;
pub mod schedule;
pub mod token;

pub use context::HandlerContext;

/// Per-kind transformation of a record item into derived mutations.
pub trait TransactionHandler: Send + Sync {
    fn transaction_type(&self) -> TransactionType;

    /// Lifecycle operation; carried by the transaction kind.
    fn operation(&self) -> EntityOperation {
        EntityOperation::of(self.transaction_type())
    }

    /// Main entity of the transaction, from the body or the receipt.
    fn entity_id(&self, _ctx: &HandlerContext<'_>, _item: &RecordItem) -> Result<EntityId> {
        Ok(EntityId::EMPTY)
    }

    /// Transaction-level derivations, run for failed transactions too.
    fn update_transaction(
        &self,
        _ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        _item: &RecordItem,
    ) -> Result<()> {
        Ok(())
    }

    /// Populate and emit the lifecycle entity.
    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        entity: Entity,
        _item: &RecordItem,
    ) -> Result<()> {
        ctx.listener.on_entity(entity)?;
        Ok(())
    }
}

/// Run all handler steps for `item`.
pub fn process(
    handler: &dyn TransactionHandler,
    ctx: &mut HandlerContext<'_>,
    transaction: &mut Transaction,
    item: &RecordItem,
    entity_id: EntityId,
) -> Result<()> {
    add_common_entity_ids(ctx, item, entity_id);
    handler.update_transaction(ctx, transaction, item)?;

    if let Some(entity) = build_entity(handler.operation(), item, entity_id) {
        handler.update_entity(ctx, entity, item)?;
    }
    Ok(())
}

/// Register the main entity, node account and payer.
///
/// Submitted messages are indexed by topic message, not by topic, so their
/// main entity is skipped. The main entity of a failed transaction is not
/// referenced.
pub fn add_common_entity_ids(ctx: &mut HandlerContext<'_>, item: &RecordItem, entity_id: EntityId) {
    if item.is_successful() && item.transaction_type() != TransactionType::ConsensusSubmitMessage {
        ctx.add_entity_id(entity_id);
    }
    ctx.add_entity_id(item.node_account_id);
    ctx.add_entity_id(item.payer_account_id);
}

/// Fallback for transaction kinds newer than this build.
pub struct UnknownHandler;

impl TransactionHandler for UnknownHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::Unknown
    }

    fn update_transaction(
        &self,
        _ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if let shared_types::TransactionBody::Unknown { data_case } = item.body {
            tracing::warn!(
                consensus_timestamp = item.consensus_timestamp,
                data_case,
                "Unknown transaction type"
            );
        }
        Ok(())
    }
}

/// Handler for kinds with nothing to derive beyond the common steps.
pub struct PassThroughHandler(pub TransactionType);

impl TransactionHandler for PassThroughHandler {
    fn transaction_type(&self) -> TransactionType {
        self.0
    }
}
