//! # Record Item Processor
//!
//! Driver glue implementing [`RecordItemApi`]:
//!
//! ```text
//! RecordItem ──→ registry::select ──→ entity_id ──→ handlers::process ──→ Transaction row
//!                                                        │
//!                                                        ↓
//!                                                 EntityListener (in order)
//! ```
//!
//! The processor holds no per-transaction state; every call builds a fresh
//! [`HandlerContext`], so one processor can be shared across items.

use std::sync::Arc;

use shared_types::RecordItem;
use tracing::{debug, error, instrument};

use crate::config::ParserConfig;
use crate::domain::{build_transaction, Result};
use crate::handlers::{self, schedule::emit_executed_schedule, HandlerContext};
use crate::ports::{EntityIdService, EntityListener, ProcessedTransaction, RecordItemApi};
use crate::registry;

pub struct RecordItemProcessor {
    config: ParserConfig,
    entity_id_service: Arc<dyn EntityIdService>,
}

impl RecordItemProcessor {
    pub fn new(config: ParserConfig, entity_id_service: Arc<dyn EntityIdService>) -> Self {
        Self {
            config,
            entity_id_service,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Process `items` in order, stopping at the first fatal error.
    pub fn process_all<'a, I>(
        &self,
        items: I,
        listener: &mut dyn EntityListener,
    ) -> Result<Vec<ProcessedTransaction>>
    where
        I: IntoIterator<Item = &'a RecordItem>,
    {
        items
            .into_iter()
            .map(|item| self.process(item, listener))
            .collect()
    }

    fn derive(
        &self,
        item: &RecordItem,
        listener: &mut dyn EntityListener,
    ) -> Result<ProcessedTransaction> {
        let transaction_type = item.transaction_type();
        let handler = registry::select(transaction_type);
        let mut ctx = HandlerContext::new(
            &self.config,
            self.entity_id_service.as_ref(),
            listener,
            item.consensus_timestamp,
        );

        let entity_id = handler.entity_id(&ctx, item)?;
        let mut transaction = build_transaction(item, entity_id);
        handlers::process(handler, &mut ctx, &mut transaction, item, entity_id)?;
        emit_executed_schedule(&mut ctx, item)?;
        ctx.listener.on_transaction(transaction)?;

        let entity_ids = ctx.into_entity_ids();
        debug!(
            entity_id = %entity_id,
            referenced = entity_ids.len(),
            "Processed transaction"
        );
        Ok(ProcessedTransaction {
            consensus_timestamp: item.consensus_timestamp,
            transaction_type,
            entity_ids,
        })
    }
}

impl RecordItemApi for RecordItemProcessor {
    #[instrument(
        skip_all,
        fields(
            consensus_timestamp = item.consensus_timestamp,
            transaction_type = %item.transaction_type(),
        )
    )]
    fn process(
        &self,
        item: &RecordItem,
        listener: &mut dyn EntityListener,
    ) -> Result<ProcessedTransaction> {
        self.derive(item, listener).inspect_err(|err| {
            error!(error = %err, "Failed to process transaction");
        })
    }
}
