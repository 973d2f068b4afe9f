//! # Decoded Protocol Model
//!
//! The input side of the ingestion core: what the upstream decoder produces
//! for each consensus transaction.
//!
//! - [`TransactionBody`]: closed sum type over every transaction kind, with
//!   an explicit `Unknown` variant for kinds newer than this build.
//! - [`TransactionType`]: the payload-free tag of a body.
//! - [`TransactionRecord`]: the execution outcome (receipt, results).
//! - [`RecordItem`]: one transaction plus its outcome, the unit of work.

pub mod bodies;
pub mod record;
pub mod record_item;

pub use bodies::*;
pub use record::*;
pub use record_item::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Services API version that produced a record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct HapiVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl HapiVersion {
    /// Child contract creations are externalized as child records from here on.
    pub const V0_23_0: HapiVersion = HapiVersion::new(0, 23, 0);
    /// Token create records carry the authoritative automatic association list.
    pub const V0_27_0: HapiVersion = HapiVersion::new(0, 27, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn is_less_than(&self, other: HapiVersion) -> bool {
        *self < other
    }
}

impl fmt::Display for HapiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Payload-free tag of a [`TransactionBody`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TransactionType {
    Unknown,
    ConsensusCreateTopic,
    ConsensusUpdateTopic,
    ConsensusDeleteTopic,
    ConsensusSubmitMessage,
    ContractCall,
    ContractCreateInstance,
    ContractUpdateInstance,
    ContractDeleteInstance,
    EthereumTransaction,
    CryptoAddLiveHash,
    CryptoAdjustAllowance,
    CryptoApproveAllowance,
    CryptoCreateAccount,
    CryptoDelete,
    CryptoDeleteAllowance,
    CryptoDeleteLiveHash,
    CryptoTransfer,
    CryptoUpdateAccount,
    FileAppend,
    FileCreate,
    FileDelete,
    FileUpdate,
    SystemDelete,
    SystemUndelete,
    Freeze,
    NodeStakeUpdate,
    UtilPrng,
    UncheckedSubmit,
    TokenAirdrop,
    TokenAssociate,
    TokenBurn,
    TokenCancelAirdrop,
    TokenClaimAirdrop,
    TokenCreation,
    TokenDeletion,
    TokenDissociate,
    TokenFeeScheduleUpdate,
    TokenFreeze,
    TokenGrantKyc,
    TokenMint,
    TokenPause,
    TokenReject,
    TokenRevokeKyc,
    TokenUnfreeze,
    TokenUnpause,
    TokenUpdate,
    TokenUpdateNfts,
    TokenWipe,
    ScheduleCreate,
    ScheduleDelete,
    ScheduleSign,
    NodeCreate,
    NodeDelete,
    NodeUpdate,
}

impl TransactionType {
    /// Every tag, in declaration order.
    pub const ALL: [TransactionType; 55] = [
        TransactionType::Unknown,
        TransactionType::ConsensusCreateTopic,
        TransactionType::ConsensusUpdateTopic,
        TransactionType::ConsensusDeleteTopic,
        TransactionType::ConsensusSubmitMessage,
        TransactionType::ContractCall,
        TransactionType::ContractCreateInstance,
        TransactionType::ContractUpdateInstance,
        TransactionType::ContractDeleteInstance,
        TransactionType::EthereumTransaction,
        TransactionType::CryptoAddLiveHash,
        TransactionType::CryptoAdjustAllowance,
        TransactionType::CryptoApproveAllowance,
        TransactionType::CryptoCreateAccount,
        TransactionType::CryptoDelete,
        TransactionType::CryptoDeleteAllowance,
        TransactionType::CryptoDeleteLiveHash,
        TransactionType::CryptoTransfer,
        TransactionType::CryptoUpdateAccount,
        TransactionType::FileAppend,
        TransactionType::FileCreate,
        TransactionType::FileDelete,
        TransactionType::FileUpdate,
        TransactionType::SystemDelete,
        TransactionType::SystemUndelete,
        TransactionType::Freeze,
        TransactionType::NodeStakeUpdate,
        TransactionType::UtilPrng,
        TransactionType::UncheckedSubmit,
        TransactionType::TokenAirdrop,
        TransactionType::TokenAssociate,
        TransactionType::TokenBurn,
        TransactionType::TokenCancelAirdrop,
        TransactionType::TokenClaimAirdrop,
        TransactionType::TokenCreation,
        TransactionType::TokenDeletion,
        TransactionType::TokenDissociate,
        TransactionType::TokenFeeScheduleUpdate,
        TransactionType::TokenFreeze,
        TransactionType::TokenGrantKyc,
        TransactionType::TokenMint,
        TransactionType::TokenPause,
        TransactionType::TokenReject,
        TransactionType::TokenRevokeKyc,
        TransactionType::TokenUnfreeze,
        TransactionType::TokenUnpause,
        TransactionType::TokenUpdate,
        TransactionType::TokenUpdateNfts,
        TransactionType::TokenWipe,
        TransactionType::ScheduleCreate,
        TransactionType::ScheduleDelete,
        TransactionType::ScheduleSign,
        TransactionType::NodeCreate,
        TransactionType::NodeDelete,
        TransactionType::NodeUpdate,
    ];
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Decoded transaction body, one variant per transaction kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionBody {
    ConsensusCreateTopic(ConsensusCreateTopicBody),
    ConsensusUpdateTopic(ConsensusUpdateTopicBody),
    ConsensusDeleteTopic(ConsensusDeleteTopicBody),
    ConsensusSubmitMessage(ConsensusSubmitMessageBody),
    ContractCall(ContractCallBody),
    ContractCreateInstance(ContractCreateBody),
    ContractUpdateInstance(ContractUpdateBody),
    ContractDeleteInstance(ContractDeleteBody),
    EthereumTransaction(EthereumTransactionBody),
    CryptoAddLiveHash(CryptoAddLiveHashBody),
    CryptoAdjustAllowance(CryptoApproveAllowanceBody),
    CryptoApproveAllowance(CryptoApproveAllowanceBody),
    CryptoCreateAccount(CryptoCreateAccountBody),
    CryptoDelete(CryptoDeleteBody),
    CryptoDeleteAllowance(CryptoDeleteAllowanceBody),
    CryptoDeleteLiveHash(CryptoDeleteLiveHashBody),
    CryptoTransfer(CryptoTransferBody),
    CryptoUpdateAccount(CryptoUpdateAccountBody),
    FileAppend(FileAppendBody),
    FileCreate(FileCreateBody),
    FileDelete(FileDeleteBody),
    FileUpdate(FileUpdateBody),
    SystemDelete(SystemDeleteBody),
    SystemUndelete(SystemUndeleteBody),
    Freeze(FreezeBody),
    NodeStakeUpdate(NodeStakeUpdateBody),
    UtilPrng(UtilPrngBody),
    UncheckedSubmit(UncheckedSubmitBody),
    TokenAirdrop(TokenAirdropBody),
    TokenAssociate(TokenAssociationBody),
    TokenBurn(TokenBurnBody),
    TokenCancelAirdrop(PendingAirdropsBody),
    TokenClaimAirdrop(PendingAirdropsBody),
    TokenCreation(TokenCreateBody),
    TokenDeletion(TokenIdBody),
    TokenDissociate(TokenAssociationBody),
    TokenFeeScheduleUpdate(TokenFeeScheduleUpdateBody),
    TokenFreeze(TokenAccountBody),
    TokenGrantKyc(TokenAccountBody),
    TokenMint(TokenMintBody),
    TokenPause(TokenIdBody),
    TokenReject(TokenRejectBody),
    TokenRevokeKyc(TokenAccountBody),
    TokenUnfreeze(TokenAccountBody),
    TokenUnpause(TokenIdBody),
    TokenUpdate(TokenUpdateBody),
    TokenUpdateNfts(TokenUpdateNftsBody),
    TokenWipe(TokenWipeBody),
    ScheduleCreate(ScheduleCreateBody),
    ScheduleDelete(ScheduleIdBody),
    ScheduleSign(ScheduleIdBody),
    NodeCreate(NodeCreateBody),
    NodeDelete(NodeDeleteBody),
    NodeUpdate(NodeUpdateBody),
    /// A body kind this build does not recognize; carries the protobuf field number.
    Unknown { data_case: i32 },
}

impl TransactionBody {
    /// The tag of this body.
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::ConsensusCreateTopic(_) => TransactionType::ConsensusCreateTopic,
            Self::ConsensusUpdateTopic(_) => TransactionType::ConsensusUpdateTopic,
            Self::ConsensusDeleteTopic(_) => TransactionType::ConsensusDeleteTopic,
            Self::ConsensusSubmitMessage(_) => TransactionType::ConsensusSubmitMessage,
            Self::ContractCall(_) => TransactionType::ContractCall,
            Self::ContractCreateInstance(_) => TransactionType::ContractCreateInstance,
            Self::ContractUpdateInstance(_) => TransactionType::ContractUpdateInstance,
            Self::ContractDeleteInstance(_) => TransactionType::ContractDeleteInstance,
            Self::EthereumTransaction(_) => TransactionType::EthereumTransaction,
            Self::CryptoAddLiveHash(_) => TransactionType::CryptoAddLiveHash,
            Self::CryptoAdjustAllowance(_) => TransactionType::CryptoAdjustAllowance,
            Self::CryptoApproveAllowance(_) => TransactionType::CryptoApproveAllowance,
            Self::CryptoCreateAccount(_) => TransactionType::CryptoCreateAccount,
            Self::CryptoDelete(_) => TransactionType::CryptoDelete,
            Self::CryptoDeleteAllowance(_) => TransactionType::CryptoDeleteAllowance,
            Self::CryptoDeleteLiveHash(_) => TransactionType::CryptoDeleteLiveHash,
            Self::CryptoTransfer(_) => TransactionType::CryptoTransfer,
            Self::CryptoUpdateAccount(_) => TransactionType::CryptoUpdateAccount,
            Self::FileAppend(_) => TransactionType::FileAppend,
            Self::FileCreate(_) => TransactionType::FileCreate,
            Self::FileDelete(_) => TransactionType::FileDelete,
            Self::FileUpdate(_) => TransactionType::FileUpdate,
            Self::SystemDelete(_) => TransactionType::SystemDelete,
            Self::SystemUndelete(_) => TransactionType::SystemUndelete,
            Self::Freeze(_) => TransactionType::Freeze,
            Self::NodeStakeUpdate(_) => TransactionType::NodeStakeUpdate,
            Self::UtilPrng(_) => TransactionType::UtilPrng,
            Self::UncheckedSubmit(_) => TransactionType::UncheckedSubmit,
            Self::TokenAirdrop(_) => TransactionType::TokenAirdrop,
            Self::TokenAssociate(_) => TransactionType::TokenAssociate,
            Self::TokenBurn(_) => TransactionType::TokenBurn,
            Self::TokenCancelAirdrop(_) => TransactionType::TokenCancelAirdrop,
            Self::TokenClaimAirdrop(_) => TransactionType::TokenClaimAirdrop,
            Self::TokenCreation(_) => TransactionType::TokenCreation,
            Self::TokenDeletion(_) => TransactionType::TokenDeletion,
            Self::TokenDissociate(_) => TransactionType::TokenDissociate,
            Self::TokenFeeScheduleUpdate(_) => TransactionType::TokenFeeScheduleUpdate,
            Self::TokenFreeze(_) => TransactionType::TokenFreeze,
            Self::TokenGrantKyc(_) => TransactionType::TokenGrantKyc,
            Self::TokenMint(_) => TransactionType::TokenMint,
            Self::TokenPause(_) => TransactionType::TokenPause,
            Self::TokenReject(_) => TransactionType::TokenReject,
            Self::TokenRevokeKyc(_) => TransactionType::TokenRevokeKyc,
            Self::TokenUnfreeze(_) => TransactionType::TokenUnfreeze,
            Self::TokenUnpause(_) => TransactionType::TokenUnpause,
            Self::TokenUpdate(_) => TransactionType::TokenUpdate,
            Self::TokenUpdateNfts(_) => TransactionType::TokenUpdateNfts,
            Self::TokenWipe(_) => TransactionType::TokenWipe,
            Self::ScheduleCreate(_) => TransactionType::ScheduleCreate,
            Self::ScheduleDelete(_) => TransactionType::ScheduleDelete,
            Self::ScheduleSign(_) => TransactionType::ScheduleSign,
            Self::NodeCreate(_) => TransactionType::NodeCreate,
            Self::NodeDelete(_) => TransactionType::NodeDelete,
            Self::NodeUpdate(_) => TransactionType::NodeUpdate,
            Self::Unknown { .. } => TransactionType::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_hapi_version_ordering() {
        assert!(HapiVersion::new(0, 22, 9).is_less_than(HapiVersion::V0_23_0));
        assert!(!HapiVersion::new(0, 23, 0).is_less_than(HapiVersion::V0_23_0));
        assert!(HapiVersion::V0_23_0 < HapiVersion::V0_27_0);
        assert!(HapiVersion::new(0, 50, 0) > HapiVersion::new(0, 9, 99));
        assert_eq!(HapiVersion::V0_27_0.to_string(), "0.27.0");
    }

    #[test]
    fn test_all_transaction_types_distinct() {
        let unique: HashSet<_> = TransactionType::ALL.iter().collect();
        assert_eq!(unique.len(), TransactionType::ALL.len());
    }

    #[test]
    fn test_unknown_body_maps_to_unknown_type() {
        let body = TransactionBody::Unknown { data_case: 99 };
        assert_eq!(body.transaction_type(), TransactionType::Unknown);
    }

    #[test]
    fn test_shared_body_types_keep_distinct_tags() {
        let body = CryptoApproveAllowanceBody::default();
        assert_eq!(
            TransactionBody::CryptoAdjustAllowance(body.clone()).transaction_type(),
            TransactionType::CryptoAdjustAllowance
        );
        assert_eq!(
            TransactionBody::CryptoApproveAllowance(body).transaction_type(),
            TransactionType::CryptoApproveAllowance
        );
    }
}
