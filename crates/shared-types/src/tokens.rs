//! # Token Domain Rows
//!
//! Tokens, token-account relationships, NFTs, allowances, airdrops and
//! custom fees.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::ids::EntityId;
use crate::protocol::{TokenSupplyType, TokenType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenFreezeStatus {
    NotApplicable,
    Frozen,
    Unfrozen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKycStatus {
    NotApplicable,
    Granted,
    Revoked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenPauseStatus {
    NotApplicable,
    Paused,
    Unpaused,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub token_id: EntityId,
    pub created_timestamp: Option<i64>,
    pub decimals: Option<i32>,
    pub fee_schedule_key: Option<Vec<u8>>,
    pub freeze_default: Option<bool>,
    pub freeze_key: Option<Vec<u8>>,
    pub initial_supply: Option<i64>,
    pub kyc_key: Option<Vec<u8>>,
    pub max_supply: Option<i64>,
    pub metadata: Option<Vec<u8>>,
    pub metadata_key: Option<Vec<u8>>,
    pub name: Option<String>,
    pub pause_key: Option<Vec<u8>>,
    pub pause_status: Option<TokenPauseStatus>,
    pub supply_key: Option<Vec<u8>>,
    pub supply_type: Option<TokenSupplyType>,
    pub symbol: Option<String>,
    pub timestamp_lower: i64,
    pub total_supply: Option<i64>,
    pub treasury_account_id: Option<EntityId>,
    pub token_type: Option<TokenType>,
    pub wipe_key: Option<Vec<u8>>,
}

impl Token {
    pub fn new(token_id: EntityId, timestamp_lower: i64) -> Self {
        Self {
            token_id,
            timestamp_lower,
            ..Default::default()
        }
    }
}

/// Relationship between an account and a token.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccount {
    pub account_id: EntityId,
    pub token_id: EntityId,
    pub associated: Option<bool>,
    pub automatic_association: Option<bool>,
    pub balance: Option<i64>,
    pub created_timestamp: Option<i64>,
    pub freeze_status: Option<TokenFreezeStatus>,
    pub kyc_status: Option<TokenKycStatus>,
    pub timestamp_lower: i64,
}

impl TokenAccount {
    pub fn new(account_id: EntityId, token_id: EntityId, timestamp_lower: i64) -> Self {
        Self {
            account_id,
            token_id,
            timestamp_lower,
            ..Default::default()
        }
    }

    /// A fresh association opened at `timestamp`.
    pub fn associated(account_id: EntityId, token_id: EntityId, timestamp: i64) -> Self {
        Self {
            associated: Some(true),
            automatic_association: Some(false),
            balance: Some(0),
            created_timestamp: Some(timestamp),
            ..Self::new(account_id, token_id, timestamp)
        }
    }
}

/// NFT instance. Per-serial allowance changes set `spender` and
/// `delegating_spender`; `Some(EntityId::EMPTY)` clears them.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nft {
    pub token_id: EntityId,
    pub serial_number: i64,
    pub account_id: Option<EntityId>,
    pub created_timestamp: Option<i64>,
    pub deleted: Option<bool>,
    pub delegating_spender: Option<EntityId>,
    pub metadata: Option<Vec<u8>>,
    pub spender: Option<EntityId>,
    pub timestamp_lower: i64,
}

impl Nft {
    pub fn new(token_id: EntityId, serial_number: i64, timestamp_lower: i64) -> Self {
        Self {
            token_id,
            serial_number,
            timestamp_lower,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoAllowance {
    pub owner: EntityId,
    pub spender: EntityId,
    pub amount: i64,
    pub amount_granted: i64,
    pub payer_account_id: EntityId,
    pub timestamp_lower: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAllowance {
    pub owner: EntityId,
    pub spender: EntityId,
    pub token_id: EntityId,
    pub amount: i64,
    pub amount_granted: i64,
    pub payer_account_id: EntityId,
    pub timestamp_lower: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftAllowance {
    pub owner: EntityId,
    pub spender: EntityId,
    pub token_id: EntityId,
    pub approved_for_all: bool,
    pub payer_account_id: EntityId,
    pub timestamp_lower: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenAirdropState {
    Pending,
    Claimed,
    Cancelled,
}

/// Airdrop keyed by `(sender, receiver, token, serial)`; serial is `0`
/// for fungible airdrops.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAirdrop {
    pub sender_account_id: EntityId,
    pub receiver_account_id: EntityId,
    pub token_id: EntityId,
    pub serial_number: i64,
    pub amount: Option<i64>,
    pub state: TokenAirdropState,
    pub timestamp_lower: i64,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedFee {
    pub amount: i64,
    pub collector_account_id: EntityId,
    pub denominating_token_id: Option<EntityId>,
    pub all_collectors_are_exempt: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractionalFee {
    pub numerator: i64,
    pub denominator: i64,
    pub minimum_amount: i64,
    pub maximum_amount: i64,
    pub net_of_transfers: bool,
    pub collector_account_id: EntityId,
    pub all_collectors_are_exempt: bool,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoyaltyFee {
    pub numerator: i64,
    pub denominator: i64,
    pub fallback_fee: Option<FixedFee>,
    pub collector_account_id: EntityId,
    pub all_collectors_are_exempt: bool,
}

/// Full custom fee schedule of a token; replaces the previous schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFee {
    pub entity_id: EntityId,
    pub fixed_fees: Vec<FixedFee>,
    pub fractional_fees: Vec<FractionalFee>,
    pub royalty_fees: Vec<RoyaltyFee>,
    pub timestamp_lower: i64,
}

impl CustomFee {
    pub fn is_empty(&self) -> bool {
        self.fixed_fees.is_empty() && self.fractional_fees.is_empty() && self.royalty_fees.is_empty()
    }
}
