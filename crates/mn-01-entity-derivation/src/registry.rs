//! # Handler Registry
//!
//! Maps every [`TransactionType`] to exactly one stateless handler. The
//! match is exhaustive, so a new transaction kind fails to compile until it
//! is routed; kinds with no bespoke derivation go to [`PassThroughHandler`].

use shared_types::TransactionType;

use crate::handlers::airdrop::{TokenAirdropHandler, TokenCancelAirdropHandler, TokenClaimAirdropHandler};
use crate::handlers::allowance::{CryptoAllowanceHandler, CryptoDeleteAllowanceHandler};
use crate::handlers::consensus::{
    ConsensusCreateTopicHandler, ConsensusDeleteTopicHandler, ConsensusSubmitMessageHandler,
    ConsensusUpdateTopicHandler,
};
use crate::handlers::contract::{
    ContractCallHandler, ContractCreateHandler, ContractDeleteHandler, ContractUpdateHandler,
    EthereumTransactionHandler,
};
use crate::handlers::crypto::{
    CryptoAddLiveHashHandler, CryptoCreateHandler, CryptoDeleteHandler, CryptoDeleteLiveHashHandler,
    CryptoTransferHandler, CryptoUpdateHandler,
};
use crate::handlers::file::{
    FileAppendHandler, FileCreateHandler, FileDeleteHandler, FileUpdateHandler,
    SystemDeleteHandler, SystemUndeleteHandler,
};
use crate::handlers::network::{FreezeHandler, NodeStakeUpdateHandler, UtilPrngHandler};
use crate::handlers::node::{NodeCreateHandler, NodeDeleteHandler, NodeUpdateHandler};
use crate::handlers::schedule::{ScheduleCreateHandler, ScheduleDeleteHandler, ScheduleSignHandler};
use crate::handlers::token::{
    TokenAccountStatusHandler, TokenAssociateHandler, TokenBurnHandler, TokenCreateHandler,
    TokenDeleteHandler, TokenDissociateHandler, TokenFeeScheduleUpdateHandler, TokenMintHandler,
    TokenPauseHandler, TokenRejectHandler, TokenUnpauseHandler, TokenUpdateHandler,
    TokenUpdateNftsHandler, TokenWipeHandler,
};
use crate::handlers::{PassThroughHandler, TransactionHandler, UnknownHandler};

/// Handler responsible for `transaction_type`.
pub fn select(transaction_type: TransactionType) -> &'static dyn TransactionHandler {
    use TransactionType as T;

    match transaction_type {
        T::Unknown => &UnknownHandler,

        T::ConsensusCreateTopic => &ConsensusCreateTopicHandler,
        T::ConsensusUpdateTopic => &ConsensusUpdateTopicHandler,
        T::ConsensusDeleteTopic => &ConsensusDeleteTopicHandler,
        T::ConsensusSubmitMessage => &ConsensusSubmitMessageHandler,

        T::ContractCall => &ContractCallHandler,
        T::ContractCreateInstance => &ContractCreateHandler,
        T::ContractUpdateInstance => &ContractUpdateHandler,
        T::ContractDeleteInstance => &ContractDeleteHandler,
        T::EthereumTransaction => &EthereumTransactionHandler,

        T::CryptoAddLiveHash => &CryptoAddLiveHashHandler,
        T::CryptoAdjustAllowance => &CryptoAllowanceHandler(T::CryptoAdjustAllowance),
        T::CryptoApproveAllowance => &CryptoAllowanceHandler(T::CryptoApproveAllowance),
        T::CryptoCreateAccount => &CryptoCreateHandler,
        T::CryptoDelete => &CryptoDeleteHandler,
        T::CryptoDeleteAllowance => &CryptoDeleteAllowanceHandler,
        T::CryptoDeleteLiveHash => &CryptoDeleteLiveHashHandler,
        T::CryptoTransfer => &CryptoTransferHandler,
        T::CryptoUpdateAccount => &CryptoUpdateHandler,

        T::FileAppend => &FileAppendHandler,
        T::FileCreate => &FileCreateHandler,
        T::FileDelete => &FileDeleteHandler,
        T::FileUpdate => &FileUpdateHandler,
        T::SystemDelete => &SystemDeleteHandler,
        T::SystemUndelete => &SystemUndeleteHandler,

        T::Freeze => &FreezeHandler,
        T::NodeStakeUpdate => &NodeStakeUpdateHandler,
        T::UtilPrng => &UtilPrngHandler,
        T::UncheckedSubmit => &PassThroughHandler(T::UncheckedSubmit),

        T::TokenAirdrop => &TokenAirdropHandler,
        T::TokenAssociate => &TokenAssociateHandler,
        T::TokenBurn => &TokenBurnHandler,
        T::TokenCancelAirdrop => &TokenCancelAirdropHandler,
        T::TokenClaimAirdrop => &TokenClaimAirdropHandler,
        T::TokenCreation => &TokenCreateHandler,
        T::TokenDeletion => &TokenDeleteHandler,
        T::TokenDissociate => &TokenDissociateHandler,
        T::TokenFeeScheduleUpdate => &TokenFeeScheduleUpdateHandler,
        T::TokenFreeze => &TokenAccountStatusHandler(T::TokenFreeze),
        T::TokenGrantKyc => &TokenAccountStatusHandler(T::TokenGrantKyc),
        T::TokenMint => &TokenMintHandler,
        T::TokenPause => &TokenPauseHandler,
        T::TokenReject => &TokenRejectHandler,
        T::TokenRevokeKyc => &TokenAccountStatusHandler(T::TokenRevokeKyc),
        T::TokenUnfreeze => &TokenAccountStatusHandler(T::TokenUnfreeze),
        T::TokenUnpause => &TokenUnpauseHandler,
        T::TokenUpdate => &TokenUpdateHandler,
        T::TokenUpdateNfts => &TokenUpdateNftsHandler,
        T::TokenWipe => &TokenWipeHandler,

        T::ScheduleCreate => &ScheduleCreateHandler,
        T::ScheduleDelete => &ScheduleDeleteHandler,
        T::ScheduleSign => &ScheduleSignHandler,

        T::NodeCreate => &NodeCreateHandler,
        T::NodeDelete => &NodeDeleteHandler,
        T::NodeUpdate => &NodeUpdateHandler,
    }
}
