//! # Transaction Bodies
//!
//! Payload structs for each variant of [`super::TransactionBody`]. These are
//! the decoded form of the protocol bodies; the upstream decoder fills them.
//!
//! Optional fields distinguish "not set by the body" (`None`) from a value.
//! For keys, `Some(vec![])` means the key was explicitly cleared.

use serde::{Deserialize, Serialize};

use crate::ids::{AccountId, ContractId, EntityId};

/// Serialized protocol key. An empty vector is an explicitly cleared key.
pub type Key = Vec<u8>;

/// Target of a staking election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakedId {
    Account(AccountId),
    Node(i64),
}

// =============================================================================
// CONSENSUS SERVICE
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusCreateTopicBody {
    pub admin_key: Option<Key>,
    pub submit_key: Option<Key>,
    pub auto_renew_account: Option<AccountId>,
    pub auto_renew_period: Option<i64>,
    pub memo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusUpdateTopicBody {
    pub topic_id: EntityId,
    pub admin_key: Option<Key>,
    pub submit_key: Option<Key>,
    pub auto_renew_account: Option<AccountId>,
    pub auto_renew_period: Option<i64>,
    pub expiration_time: Option<i64>,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusDeleteTopicBody {
    pub topic_id: EntityId,
}

/// Transaction id as carried inside chunk info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionIdBody {
    pub payer: EntityId,
    pub valid_start_ns: i64,
    pub nonce: i32,
    pub scheduled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkInfo {
    pub initial_transaction_id: TransactionIdBody,
    pub number: i32,
    pub total: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusSubmitMessageBody {
    pub topic_id: EntityId,
    pub message: Vec<u8>,
    pub chunk_info: Option<ChunkInfo>,
}

// =============================================================================
// SMART CONTRACT SERVICE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitcodeSource {
    FileId(EntityId),
    Initcode(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCallBody {
    pub contract_id: ContractId,
    pub gas: i64,
    pub amount: i64,
    pub function_parameters: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCreateBody {
    pub initcode_source: Option<InitcodeSource>,
    pub admin_key: Option<Key>,
    pub auto_renew_account: Option<AccountId>,
    pub auto_renew_period: Option<i64>,
    pub gas: i64,
    pub initial_balance: i64,
    pub memo: String,
    pub max_automatic_token_associations: i32,
    pub decline_reward: bool,
    pub staked_id: Option<StakedId>,
    pub proxy_account: Option<AccountId>,
    pub constructor_parameters: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractUpdateBody {
    pub contract_id: ContractId,
    pub admin_key: Option<Key>,
    pub auto_renew_account: Option<AccountId>,
    pub auto_renew_period: Option<i64>,
    pub expiration_time: Option<i64>,
    pub memo: Option<String>,
    pub max_automatic_token_associations: Option<i32>,
    pub decline_reward: Option<bool>,
    pub staked_id: Option<StakedId>,
    pub proxy_account: Option<AccountId>,
}

/// Where a deleted contract's residual balance goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Obtainer {
    Account(AccountId),
    Contract(ContractId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDeleteBody {
    pub contract_id: ContractId,
    pub obtainer: Option<Obtainer>,
    pub permanent_removal: bool,
}

/// Ethereum transaction fields as decoded upstream from the RLP payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthereumData {
    pub transaction_type: i32,
    pub chain_id: Vec<u8>,
    pub nonce: i64,
    pub gas_price: Vec<u8>,
    pub max_fee_per_gas: Vec<u8>,
    pub max_priority_fee_per_gas: Vec<u8>,
    pub gas_limit: i64,
    /// Empty for contract creation.
    pub to_address: Vec<u8>,
    pub value: Vec<u8>,
    pub call_data: Vec<u8>,
    pub access_list: Vec<u8>,
    pub signature_v: Vec<u8>,
    pub signature_r: Vec<u8>,
    pub signature_s: Vec<u8>,
    pub recovery_id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthereumTransactionBody {
    /// Raw RLP bytes.
    pub ethereum_data: Vec<u8>,
    /// File holding call data too large to inline.
    pub call_data_file: Option<EntityId>,
    pub max_gas_allowance: i64,
    pub decoded: EthereumData,
}

// =============================================================================
// CRYPTO SERVICE
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoCreateAccountBody {
    pub key: Option<Key>,
    pub alias: Vec<u8>,
    pub auto_renew_period: Option<i64>,
    pub initial_balance: i64,
    pub memo: String,
    pub receiver_sig_required: bool,
    pub max_automatic_token_associations: i32,
    pub decline_reward: bool,
    pub staked_id: Option<StakedId>,
    pub proxy_account: Option<AccountId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoUpdateAccountBody {
    pub account: AccountId,
    pub key: Option<Key>,
    pub auto_renew_period: Option<i64>,
    pub expiration_time: Option<i64>,
    pub memo: Option<String>,
    pub receiver_sig_required: Option<bool>,
    pub max_automatic_token_associations: Option<i32>,
    pub decline_reward: Option<bool>,
    pub staked_id: Option<StakedId>,
    pub proxy_account: Option<AccountId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoDeleteBody {
    pub delete_account: AccountId,
    pub transfer_account: Option<AccountId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoAddLiveHashBody {
    pub account: AccountId,
    pub hash: Vec<u8>,
    pub keys: Vec<Key>,
    pub duration: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoDeleteLiveHashBody {
    pub account: AccountId,
    pub hash: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAmount {
    pub account: AccountId,
    pub amount: i64,
    pub is_approval: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftTransfer {
    pub sender: AccountId,
    pub receiver: AccountId,
    pub serial_number: i64,
    pub is_approval: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransferList {
    pub token_id: EntityId,
    pub transfers: Vec<AccountAmount>,
    pub nft_transfers: Vec<NftTransfer>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoTransferBody {
    pub transfers: Vec<AccountAmount>,
    pub token_transfers: Vec<TokenTransferList>,
}

/// One hbar allowance grant. An absent owner means the payer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoAllowanceGrant {
    pub owner: Option<AccountId>,
    pub spender: AccountId,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAllowanceGrant {
    pub token_id: EntityId,
    pub owner: Option<AccountId>,
    pub spender: AccountId,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftAllowanceGrant {
    pub token_id: EntityId,
    pub owner: Option<AccountId>,
    pub spender: AccountId,
    pub serial_numbers: Vec<i64>,
    /// `None` when the grant is per-serial only.
    pub approved_for_all: Option<bool>,
    pub delegating_spender: Option<AccountId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoApproveAllowanceBody {
    pub crypto_allowances: Vec<CryptoAllowanceGrant>,
    pub nft_allowances: Vec<NftAllowanceGrant>,
    pub token_allowances: Vec<TokenAllowanceGrant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftRemoveAllowance {
    pub token_id: EntityId,
    pub owner: Option<AccountId>,
    pub serial_numbers: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoDeleteAllowanceBody {
    pub nft_allowances: Vec<NftRemoveAllowance>,
}

// =============================================================================
// FILE SERVICE
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCreateBody {
    pub contents: Vec<u8>,
    pub keys: Option<Key>,
    pub expiration_time: Option<i64>,
    pub memo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAppendBody {
    pub file_id: EntityId,
    pub contents: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpdateBody {
    pub file_id: EntityId,
    pub contents: Vec<u8>,
    pub keys: Option<Key>,
    pub expiration_time: Option<i64>,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDeleteBody {
    pub file_id: EntityId,
}

/// Target of a privileged system delete/undelete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemTarget {
    File(EntityId),
    Contract(ContractId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemDeleteBody {
    pub target: Option<SystemTarget>,
    pub expiration_time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemUndeleteBody {
    pub target: Option<SystemTarget>,
}

// =============================================================================
// NETWORK / UTIL SERVICE
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FreezeType {
    #[default]
    UnknownFreezeType,
    FreezeOnly,
    PrepareUpgrade,
    FreezeUpgrade,
    FreezeAbort,
    TelemetryUpgrade,
}

/// Deprecated hour/minute freeze window, relative to the transaction's UTC day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyFreezeWindow {
    pub start_hour: u32,
    pub start_min: u32,
    pub end_hour: u32,
    pub end_min: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeBody {
    /// Explicit start, nanoseconds since epoch.
    pub start_time: Option<i64>,
    pub legacy_window: Option<LegacyFreezeWindow>,
    pub update_file: Option<EntityId>,
    pub file_hash: Vec<u8>,
    pub freeze_type: FreezeType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction {
    pub numerator: i64,
    pub denominator: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStakeEntry {
    pub node_id: i64,
    pub max_stake: i64,
    pub min_stake: i64,
    pub reward_rate: i64,
    pub stake: i64,
    pub stake_not_rewarded: i64,
    pub stake_rewarded: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStakeUpdateBody {
    /// Nanoseconds since epoch.
    pub end_of_staking_period: i64,
    pub node_stakes: Vec<NodeStakeEntry>,
    pub max_stake_rewarded: i64,
    pub max_staking_reward_rate_per_hbar: i64,
    pub max_total_reward: i64,
    pub node_reward_fee_fraction: Fraction,
    pub reserved_staking_rewards: i64,
    pub reward_balance_threshold: i64,
    /// Minutes.
    pub staking_period: i64,
    pub staking_periods_stored: i64,
    pub staking_reward_fee_fraction: Fraction,
    pub staking_reward_rate: i64,
    pub staking_start_threshold: i64,
    pub unreserved_staking_reward_balance: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilPrngBody {
    pub range: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UncheckedSubmitBody {
    pub transaction_bytes: Vec<u8>,
}

// =============================================================================
// TOKEN SERVICE
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
    #[default]
    FungibleCommon,
    NonFungibleUnique,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenSupplyType {
    #[default]
    Infinite,
    Finite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedFeeSpec {
    pub amount: i64,
    /// `None` for hbar. `Some(EntityId::EMPTY)` denotes the token being created.
    pub denominating_token_id: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractionalFeeSpec {
    pub fraction: Fraction,
    pub minimum_amount: i64,
    pub maximum_amount: i64,
    pub net_of_transfers: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoyaltyFeeSpec {
    pub exchange_value_fraction: Fraction,
    pub fallback_fee: Option<FixedFeeSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomFeeKind {
    Fixed(FixedFeeSpec),
    Fractional(FractionalFeeSpec),
    Royalty(RoyaltyFeeSpec),
    /// A fee variant this decoder does not know.
    Unknown(i32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFeeSpec {
    pub fee: CustomFeeKind,
    pub fee_collector: AccountId,
    pub all_collectors_are_exempt: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCreateBody {
    pub name: String,
    pub symbol: String,
    pub decimals: i32,
    pub initial_supply: i64,
    pub treasury: Option<AccountId>,
    pub admin_key: Option<Key>,
    pub kyc_key: Option<Key>,
    pub freeze_key: Option<Key>,
    pub wipe_key: Option<Key>,
    pub supply_key: Option<Key>,
    pub fee_schedule_key: Option<Key>,
    pub pause_key: Option<Key>,
    pub metadata_key: Option<Key>,
    pub freeze_default: bool,
    pub expiry: Option<i64>,
    pub auto_renew_account: Option<AccountId>,
    pub auto_renew_period: Option<i64>,
    pub memo: String,
    pub token_type: TokenType,
    pub supply_type: TokenSupplyType,
    pub max_supply: i64,
    pub custom_fees: Vec<CustomFeeSpec>,
    pub metadata: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUpdateBody {
    pub token_id: EntityId,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub treasury: Option<AccountId>,
    pub admin_key: Option<Key>,
    pub kyc_key: Option<Key>,
    pub freeze_key: Option<Key>,
    pub wipe_key: Option<Key>,
    pub supply_key: Option<Key>,
    pub fee_schedule_key: Option<Key>,
    pub pause_key: Option<Key>,
    pub metadata_key: Option<Key>,
    pub expiry: Option<i64>,
    pub auto_renew_account: Option<AccountId>,
    pub auto_renew_period: Option<i64>,
    pub memo: Option<String>,
    pub metadata: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenIdBody {
    pub token_id: EntityId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMintBody {
    pub token_id: EntityId,
    pub amount: i64,
    pub metadata: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBurnBody {
    pub token_id: EntityId,
    pub amount: i64,
    pub serial_numbers: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenWipeBody {
    pub token_id: EntityId,
    pub account: AccountId,
    pub amount: i64,
    pub serial_numbers: Vec<i64>,
}

/// Body shared by associate and dissociate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAssociationBody {
    pub account: AccountId,
    pub tokens: Vec<EntityId>,
}

/// Body shared by freeze/unfreeze and grant/revoke KYC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccountBody {
    pub token_id: EntityId,
    pub account: AccountId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenFeeScheduleUpdateBody {
    pub token_id: EntityId,
    pub custom_fees: Vec<CustomFeeSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUpdateNftsBody {
    pub token_id: EntityId,
    pub serial_numbers: Vec<i64>,
    pub metadata: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenReference {
    Fungible(EntityId),
    Nft { token_id: EntityId, serial_number: i64 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRejectBody {
    pub owner: Option<AccountId>,
    pub rejections: Vec<TokenReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAirdropBody {
    pub token_transfers: Vec<TokenTransferList>,
}

/// Key of a pending airdrop: fungible token, or a single NFT serial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAirdropId {
    pub sender: AccountId,
    pub receiver: AccountId,
    pub token: TokenReference,
}

/// Body shared by cancel and claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAirdropsBody {
    pub pending_airdrops: Vec<PendingAirdropId>,
}

// =============================================================================
// SCHEDULE SERVICE
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleCreateBody {
    pub scheduled_transaction_body: Vec<u8>,
    pub memo: String,
    pub admin_key: Option<Key>,
    pub payer: Option<AccountId>,
    pub expiration_time: Option<i64>,
    pub wait_for_expiry: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleIdBody {
    pub schedule_id: EntityId,
}

// =============================================================================
// ADDRESS BOOK SERVICE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCreateBody {
    pub account: AccountId,
    pub description: String,
    pub admin_key: Option<Key>,
    pub decline_reward: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeUpdateBody {
    pub node_id: i64,
    pub account: Option<AccountId>,
    pub description: Option<String>,
    pub admin_key: Option<Key>,
    pub decline_reward: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDeleteBody {
    pub node_id: i64,
}
