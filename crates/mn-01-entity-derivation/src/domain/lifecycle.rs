//! # Entity Lifecycle
//!
//! Bitemporal CREATE/UPDATE/DELETE state machine. The operation is carried
//! by the transaction kind, never inferred from entity content.
//!
//! ```text
//!   absent ──CREATE──→ created ──UPDATE──→ updated ──DELETE──→ deleted
//!                                   ↑                            │
//!                                   └──────── UPDATE ────────────┘
//! ```
//!
//! Every mutation opens a new validity interval at the consensus timestamp;
//! the sink closes the prior one, so history is never purged.

use serde::{Deserialize, Serialize};
use shared_types::{Entity, EntityId, RecordItem, TransactionType};

/// Lifecycle operation implied by a transaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityOperation {
    Create,
    Update,
    Delete,
    None,
}

impl EntityOperation {
    pub fn of(transaction_type: TransactionType) -> Self {
        use TransactionType::*;

        match transaction_type {
            ConsensusCreateTopic | ContractCreateInstance | CryptoCreateAccount | FileCreate
            | TokenCreation | ScheduleCreate => Self::Create,
            ConsensusUpdateTopic | ContractUpdateInstance | CryptoUpdateAccount | FileUpdate
            | TokenUpdate | SystemUndelete => Self::Update,
            ConsensusDeleteTopic | ContractDeleteInstance | CryptoDelete | FileDelete
            | TokenDeletion | ScheduleDelete | SystemDelete => Self::Delete,
            _ => Self::None,
        }
    }
}

/// Fresh entity pre-populated for `operation`, or `None` when the
/// transaction failed, carries no lifecycle operation, or has no entity.
pub fn build_entity(
    operation: EntityOperation,
    item: &RecordItem,
    entity_id: EntityId,
) -> Option<Entity> {
    if !item.is_successful() || operation == EntityOperation::None || entity_id.is_empty() {
        return None;
    }

    let timestamp = item.consensus_timestamp;
    let mut entity = Entity::new(entity_id, timestamp);
    match operation {
        EntityOperation::Create => {
            entity.created_timestamp = Some(timestamp);
            entity.deleted = Some(false);
        }
        EntityOperation::Update => entity.deleted = Some(false),
        EntityOperation::Delete => entity.deleted = Some(true),
        EntityOperation::None => {}
    }
    Some(entity)
}
