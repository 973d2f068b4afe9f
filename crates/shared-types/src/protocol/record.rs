//! # Transaction Records
//!
//! Execution outcome of a consensus transaction: the receipt, function
//! results, and side-channel (sidecar) records.

use serde::{Deserialize, Serialize};

use super::bodies::{PendingAirdropId, TransactionIdBody};
use crate::ids::{AccountId, ContractId, EntityId};

/// Final status of a transaction, as reported by the receipt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseCode {
    #[default]
    Success,
    SuccessButMissingExpectedOperation,
    FeeScheduleFilePartUploaded,
    InvalidSignature,
    InsufficientPayerBalance,
    InvalidAccountId,
    InvalidContractId,
    InvalidTokenId,
    ContractRevertExecuted,
    InsufficientGas,
    /// Any other protocol status code.
    Other(i32),
}

impl ResponseCode {
    /// Statuses under which the transaction's effects were applied.
    pub fn is_successful(&self) -> bool {
        matches!(
            self,
            Self::Success | Self::SuccessButMissingExpectedOperation | Self::FeeScheduleFilePartUploaded
        )
    }
}

/// Receipt: ids of created resources and post-execution counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub status: ResponseCode,
    pub account_id: Option<AccountId>,
    pub contract_id: Option<ContractId>,
    pub file_id: Option<EntityId>,
    pub token_id: Option<EntityId>,
    pub topic_id: Option<EntityId>,
    pub schedule_id: Option<EntityId>,
    pub node_id: Option<i64>,
    pub topic_running_hash: Vec<u8>,
    pub topic_running_hash_version: i64,
    pub topic_sequence_number: i64,
    pub new_total_supply: i64,
    pub serial_numbers: Vec<i64>,
    pub scheduled_transaction_id: Option<TransactionIdBody>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractNonceInfo {
    pub contract_id: ContractId,
    pub nonce: i64,
}

/// EVM execution result of a call or create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractFunctionResult {
    pub contract_id: Option<ContractId>,
    pub call_result: Vec<u8>,
    pub error_message: String,
    pub bloom: Vec<u8>,
    pub gas_used: i64,
    pub gas_limit: i64,
    pub amount: i64,
    pub function_parameters: Vec<u8>,
    pub created_contract_ids: Vec<ContractId>,
    pub evm_address: Option<Vec<u8>>,
    pub sender_id: Option<AccountId>,
    pub contract_nonces: Vec<ContractNonceInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAssociation {
    pub token_id: EntityId,
    pub account_id: AccountId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAirdropRecord {
    pub pending_airdrop_id: PendingAirdropId,
    /// Fungible amount; `None` for NFT airdrops.
    pub amount: Option<i64>,
}

/// Output of a PRNG transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entropy {
    Bytes(Vec<u8>),
    Number(i32),
}

/// Execution record of a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub receipt: TransactionReceipt,
    pub transaction_hash: Vec<u8>,
    pub transaction_fee: i64,
    pub alias: Vec<u8>,
    pub evm_address: Vec<u8>,
    pub ethereum_hash: Vec<u8>,
    pub contract_call_result: Option<ContractFunctionResult>,
    pub contract_create_result: Option<ContractFunctionResult>,
    pub automatic_token_associations: Vec<TokenAssociation>,
    pub new_pending_airdrops: Vec<PendingAirdropRecord>,
    pub entropy: Option<Entropy>,
    pub schedule_ref: Option<EntityId>,
    pub parent_consensus_timestamp: Option<i64>,
}

impl TransactionRecord {
    /// The EVM result, whichever kind the record carries.
    pub fn function_result(&self) -> Option<&ContractFunctionResult> {
        self.contract_call_result
            .as_ref()
            .or(self.contract_create_result.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SidecarKind {
    Bytecode {
        contract_id: ContractId,
        initcode: Vec<u8>,
        runtime_bytecode: Vec<u8>,
    },
    StateChanges,
    Actions,
}

/// Auxiliary execution data delivered alongside the main record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidecarRecord {
    pub consensus_timestamp: i64,
    /// Set for records re-emitted for contracts created before sidecars existed.
    pub migration: bool,
    pub sidecar: SidecarKind,
}
