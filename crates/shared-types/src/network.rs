//! # Network-Level Rows
//!
//! Freeze windows, staking snapshots, PRNG output and Ethereum transactions.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::ids::EntityId;
use crate::protocol::FreezeType;

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkFreeze {
    pub consensus_timestamp: i64,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub file_hash: Vec<u8>,
    pub file_id: Option<EntityId>,
    pub payer_account_id: EntityId,
    pub freeze_type: FreezeType,
}

/// Network-wide staking snapshot for one staking period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStake {
    pub consensus_timestamp: i64,
    pub epoch_day: i64,
    pub max_stake_rewarded: i64,
    pub max_staking_reward_rate_per_hbar: i64,
    pub max_total_reward: i64,
    pub node_reward_fee_denominator: i64,
    pub node_reward_fee_numerator: i64,
    pub reserved_staking_rewards: i64,
    pub reward_balance_threshold: i64,
    pub stake_total: i64,
    pub staking_period: i64,
    pub staking_period_duration: i64,
    pub staking_periods_stored: i64,
    pub staking_reward_fee_denominator: i64,
    pub staking_reward_fee_numerator: i64,
    pub staking_reward_rate: i64,
    pub staking_start_threshold: i64,
    pub unreserved_staking_reward_balance: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStake {
    pub consensus_timestamp: i64,
    pub epoch_day: i64,
    pub node_id: i64,
    pub max_stake: i64,
    pub min_stake: i64,
    pub reward_rate: i64,
    pub stake: i64,
    pub stake_not_rewarded: i64,
    pub stake_rewarded: i64,
    pub staking_period: i64,
}

/// Output of a `UtilPrng` transaction. Exactly one of bytes/number is set.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prng {
    pub consensus_timestamp: i64,
    pub payer_account_id: EntityId,
    pub range: i32,
    pub prng_bytes: Option<Vec<u8>>,
    pub prng_number: Option<i32>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthereumTransaction {
    pub consensus_timestamp: i64,
    pub hash: Vec<u8>,
    pub payer_account_id: EntityId,
    pub call_data_id: Option<EntityId>,
    pub call_data: Option<Vec<u8>>,
    pub chain_id: Vec<u8>,
    pub data: Vec<u8>,
    pub gas_limit: i64,
    pub gas_price: Vec<u8>,
    pub max_fee_per_gas: Vec<u8>,
    pub max_gas_allowance: i64,
    pub max_priority_fee_per_gas: Vec<u8>,
    pub nonce: i64,
    pub recovery_id: Option<i32>,
    pub signature_r: Vec<u8>,
    pub signature_s: Vec<u8>,
    pub signature_v: Vec<u8>,
    pub to_address: Vec<u8>,
    pub transaction_type: i32,
    pub value: Vec<u8>,
}
