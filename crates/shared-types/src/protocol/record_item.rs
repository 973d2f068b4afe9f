//! # Record Item
//!
//! One decoded consensus transaction plus its execution outcome. A
//! `RecordItem` is immutable once handed to the ingestion core.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::record::{ResponseCode, SidecarRecord, TransactionRecord};
use super::{HapiVersion, TransactionBody, TransactionType};
use crate::ids::EntityId;

/// The unit of work for the ingestion core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordItem {
    /// Nanoseconds since epoch; strictly increasing across the stream.
    pub consensus_timestamp: i64,
    pub body: TransactionBody,
    pub record: TransactionRecord,
    pub payer_account_id: EntityId,
    pub node_account_id: EntityId,
    pub memo: String,
    pub max_fee: i64,
    pub valid_start_ns: i64,
    pub valid_duration_seconds: i64,
    /// Non-zero for child transactions.
    pub nonce: i32,
    pub scheduled: bool,
    pub hapi_version: HapiVersion,
    /// The parent transaction, for synthetic child transactions.
    pub parent: Option<Arc<RecordItem>>,
    pub sidecar_records: Vec<SidecarRecord>,
    /// Position of the transaction within its record file.
    pub transaction_index: i32,
}

impl RecordItem {
    /// A successful item with empty record and default metadata.
    pub fn new(consensus_timestamp: i64, body: TransactionBody) -> Self {
        Self {
            consensus_timestamp,
            body,
            record: TransactionRecord::default(),
            payer_account_id: EntityId::EMPTY,
            node_account_id: EntityId::EMPTY,
            memo: String::new(),
            max_fee: 0,
            valid_start_ns: consensus_timestamp,
            valid_duration_seconds: 120,
            nonce: 0,
            scheduled: false,
            hapi_version: HapiVersion::new(0, 50, 0),
            parent: None,
            sidecar_records: Vec::new(),
            transaction_index: 0,
        }
    }

    pub fn with_payer(mut self, payer: EntityId) -> Self {
        self.payer_account_id = payer;
        self
    }

    pub fn with_node(mut self, node: EntityId) -> Self {
        self.node_account_id = node;
        self
    }

    pub fn with_record(mut self, record: TransactionRecord) -> Self {
        self.record = record;
        self
    }

    pub fn with_status(mut self, status: ResponseCode) -> Self {
        self.record.receipt.status = status;
        self
    }

    pub fn with_hapi_version(mut self, version: HapiVersion) -> Self {
        self.hapi_version = version;
        self
    }

    pub fn with_parent(mut self, parent: RecordItem) -> Self {
        self.record.parent_consensus_timestamp = Some(parent.consensus_timestamp);
        self.parent = Some(Arc::new(parent));
        self
    }

    pub fn with_sidecars(mut self, sidecars: Vec<SidecarRecord>) -> Self {
        self.sidecar_records = sidecars;
        self
    }

    pub fn with_scheduled(mut self, scheduled: bool) -> Self {
        self.scheduled = scheduled;
        self
    }

    pub fn is_successful(&self) -> bool {
        self.record.receipt.status.is_successful()
    }

    pub fn is_child(&self) -> bool {
        self.parent.is_some() || self.nonce > 0
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.body.transaction_type()
    }

    pub fn parent_consensus_timestamp(&self) -> Option<i64> {
        self.record.parent_consensus_timestamp
    }
}
