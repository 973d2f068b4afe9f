//! # Inbound Ports (Driving Ports)
//!
//! API the ingestion driver calls, one record item at a time, in strict
//! consensus order.

use serde::{Deserialize, Serialize};
use shared_types::{EntityId, RecordItem, TransactionType};

use super::outbound::EntityListener;
use crate::domain::Result;

/// Outcome of processing one record item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedTransaction {
    pub consensus_timestamp: i64,
    pub transaction_type: TransactionType,
    /// Every entity the transaction referenced, first-seen order, no
    /// duplicates, never [`EntityId::EMPTY`].
    pub entity_ids: Vec<EntityId>,
}

/// Primary API of the derivation pipeline.
pub trait RecordItemApi {
    /// Derive and emit all mutations of `item`.
    ///
    /// An `Err` means the transaction must not be considered applied; the
    /// driver treats it as an ingestion-halting failure.
    fn process(
        &self,
        item: &RecordItem,
        listener: &mut dyn EntityListener,
    ) -> Result<ProcessedTransaction>;
}
