//! # Derived Domain Rows
//!
//! Value objects the ingestion core constructs fresh per transaction and
//! hands to the sink. The sink owns persistence and merging with prior state.
//!
//! ## Sparse Semantics
//!
//! Every optional field is `None` unless the triggering transaction set it.
//! `None` means "leave the stored value alone", never "reset to default".
//!
//! ## Bitemporal Rows
//!
//! Rows carrying `timestamp_lower` open a new validity interval at that
//! consensus timestamp; the sink closes the previous one.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::ids::EntityId;
use crate::protocol::{ResponseCode, TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Account,
    Contract,
    File,
    Schedule,
    Token,
    Topic,
}

/// Generic entity row shared by accounts, contracts, files, schedules,
/// tokens and topics.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub entity_type: Option<EntityType>,
    pub alias: Option<Vec<u8>>,
    pub auto_renew_account_id: Option<EntityId>,
    pub auto_renew_period: Option<i64>,
    pub created_timestamp: Option<i64>,
    pub decline_reward: Option<bool>,
    pub deleted: Option<bool>,
    pub ethereum_nonce: Option<i64>,
    pub evm_address: Option<Vec<u8>>,
    pub expiration_timestamp: Option<i64>,
    pub key: Option<Vec<u8>>,
    pub max_automatic_token_associations: Option<i32>,
    pub memo: Option<String>,
    pub obtainer_id: Option<EntityId>,
    pub permanent_removal: Option<bool>,
    pub proxy_account_id: Option<EntityId>,
    pub receiver_sig_required: Option<bool>,
    pub stake_period_start: Option<i64>,
    pub staked_account_id: Option<EntityId>,
    /// `-1` clears a node election.
    pub staked_node_id: Option<i64>,
    pub timestamp_lower: i64,
    pub timestamp_upper: Option<i64>,
}

impl Entity {
    pub fn new(id: EntityId, timestamp_lower: i64) -> Self {
        Self {
            id,
            timestamp_lower,
            ..Default::default()
        }
    }
}

/// Contract-specific data beside its [`Entity`] row.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub id: EntityId,
    pub file_id: Option<EntityId>,
    pub initcode: Option<Vec<u8>>,
    pub runtime_bytecode: Option<Vec<u8>>,
}

/// EVM outcome of a contract call/create or Ethereum transaction.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractResult {
    pub consensus_timestamp: i64,
    pub contract_id: EntityId,
    pub payer_account_id: EntityId,
    pub sender_id: Option<EntityId>,
    pub amount: i64,
    pub bloom: Vec<u8>,
    pub call_result: Vec<u8>,
    pub created_contract_ids: Vec<EntityId>,
    pub error_message: Option<String>,
    pub function_parameters: Vec<u8>,
    pub gas_limit: i64,
    pub gas_used: i64,
    pub transaction_hash: Vec<u8>,
    pub transaction_result: ResponseCode,
}

/// Topic keys beside the topic's [`Entity`] row.
///
/// `Some(vec![])` records an explicitly cleared key.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: EntityId,
    pub admin_key: Option<Vec<u8>>,
    pub submit_key: Option<Vec<u8>>,
    pub created_timestamp: Option<i64>,
    pub timestamp_lower: i64,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicMessage {
    pub consensus_timestamp: i64,
    pub topic_id: EntityId,
    pub message: Vec<u8>,
    pub running_hash: Vec<u8>,
    pub running_hash_version: i64,
    pub sequence_number: i64,
    pub payer_account_id: EntityId,
    pub chunk_num: Option<i32>,
    pub chunk_total: Option<i32>,
    pub initial_transaction_valid_start: Option<i64>,
    pub initial_transaction_payer: Option<EntityId>,
    pub valid_start_timestamp: i64,
}

/// Schedule row. Creation fills everything; execution fills only
/// `executed_timestamp`.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub schedule_id: EntityId,
    pub consensus_timestamp: Option<i64>,
    pub creator_account_id: Option<EntityId>,
    pub payer_account_id: Option<EntityId>,
    pub transaction_body: Option<Vec<u8>>,
    pub executed_timestamp: Option<i64>,
    pub expiration_time: Option<i64>,
    pub wait_for_expiry: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileData {
    pub consensus_timestamp: i64,
    pub entity_id: EntityId,
    pub file_data: Vec<u8>,
    pub transaction_type: TransactionType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveHash {
    pub consensus_timestamp: i64,
    pub livehash: Vec<u8>,
}

/// Consensus node row.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub node_id: i64,
    pub account_id: Option<EntityId>,
    pub admin_key: Option<Vec<u8>>,
    pub created_timestamp: Option<i64>,
    pub decline_reward: Option<bool>,
    pub deleted: Option<bool>,
    pub description: Option<String>,
    pub timestamp_lower: i64,
}

/// Summary row for every processed transaction.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub consensus_timestamp: i64,
    pub transaction_type: TransactionType,
    pub result: ResponseCode,
    pub payer_account_id: EntityId,
    pub node_account_id: Option<EntityId>,
    pub entity_id: Option<EntityId>,
    pub charged_tx_fee: i64,
    pub initial_balance: Option<i64>,
    pub max_fee: i64,
    pub memo: String,
    pub valid_start_ns: i64,
    pub valid_duration_seconds: i64,
    pub nonce: i32,
    pub parent_consensus_timestamp: Option<i64>,
    pub scheduled: bool,
    pub transaction_hash: Vec<u8>,
    pub index: i32,
}
