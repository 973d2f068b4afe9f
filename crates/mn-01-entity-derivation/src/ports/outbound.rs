//! # Outbound Ports (Driven Ports)
//!
//! SPIs the derivation pipeline depends on:
//!
//! - [`EntityIdService`]: turns protocol ids (possibly aliased) into
//!   canonical [`EntityId`] values.
//! - [`AliasStore`]: backing lookup behind the cached resolver adapter.
//! - [`EntityListener`]: the sink receiving derived mutations in order.

use serde::{Deserialize, Serialize};
use shared_types::{
    AccountId, Contract, ContractId, ContractResult, CryptoAllowance, CustomFee, Entity, EntityId,
    EthereumTransaction, FileData, LiveHash, NetworkFreeze, NetworkStake, Nft, NftAllowance, Node,
    NodeStake, Prng, Schedule, Token, TokenAccount, TokenAirdrop, TokenAllowance, Topic,
    TopicMessage, Transaction,
};

use crate::domain::{ListenerError, ResolutionError};

/// Resolves protocol account and contract ids to canonical ids.
///
/// The numeric form is used when set; the default (zero) id resolves to
/// [`EntityId::EMPTY`]. Aliases and EVM addresses require a lookup that may
/// block and may fail with [`ResolutionError::NotFound`].
pub trait EntityIdService: Send + Sync {
    fn lookup_account(&self, account_id: &AccountId) -> Result<EntityId, ResolutionError>;

    fn lookup_contract(&self, contract_id: &ContractId) -> Result<EntityId, ResolutionError>;

    /// Resolve preferring the receipt's id, which is populated after
    /// execution and is authoritative for newly created contracts.
    fn lookup_contract_preferring_receipt(
        &self,
        receipt_id: Option<&ContractId>,
        body_id: &ContractId,
    ) -> Result<EntityId, ResolutionError> {
        if let Some(receipt_id) = receipt_id {
            let resolved = self.lookup_contract(receipt_id)?;
            if !resolved.is_empty() {
                return Ok(resolved);
            }
        }
        self.lookup_contract(body_id)
    }

    /// Register a newly created entity's alias and EVM address so later
    /// transactions in the stream can resolve them.
    fn notify(&self, entity: &Entity);
}

/// Persistent alias and EVM address index.
pub trait AliasStore: Send + Sync {
    fn find_by_alias(
        &self,
        shard: i64,
        realm: i64,
        alias: &[u8],
    ) -> Result<Option<EntityId>, ResolutionError>;

    fn find_by_evm_address(
        &self,
        shard: i64,
        realm: i64,
        evm_address: &[u8],
    ) -> Result<Option<EntityId>, ResolutionError>;
}

/// One derived mutation handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    Contract(Contract),
    ContractResult(ContractResult),
    CryptoAllowance(CryptoAllowance),
    CustomFee(CustomFee),
    Entity(Entity),
    EthereumTransaction(EthereumTransaction),
    FileData(FileData),
    LiveHash(LiveHash),
    NetworkFreeze(NetworkFreeze),
    NetworkStake(NetworkStake),
    Nft(Nft),
    NftAllowance(NftAllowance),
    Node(Node),
    NodeStake(NodeStake),
    Prng(Prng),
    Schedule(Schedule),
    Token(Token),
    TokenAccount(TokenAccount),
    TokenAirdrop(TokenAirdrop),
    TokenAllowance(TokenAllowance),
    Topic(Topic),
    TopicMessage(TopicMessage),
    Transaction(Transaction),
}

/// Sink for derived mutations.
///
/// Calls arrive in consensus order and, within a transaction, in derivation
/// order. Implementors provide [`EntityListener::emit`]; the per-kind methods
/// route through it unless overridden.
pub trait EntityListener {
    fn emit(&mut self, mutation: Mutation) -> Result<(), ListenerError>;

    fn on_contract(&mut self, contract: Contract) -> Result<(), ListenerError> {
        self.emit(Mutation::Contract(contract))
    }

    fn on_contract_result(&mut self, result: ContractResult) -> Result<(), ListenerError> {
        self.emit(Mutation::ContractResult(result))
    }

    fn on_crypto_allowance(&mut self, allowance: CryptoAllowance) -> Result<(), ListenerError> {
        self.emit(Mutation::CryptoAllowance(allowance))
    }

    fn on_custom_fee(&mut self, fee: CustomFee) -> Result<(), ListenerError> {
        self.emit(Mutation::CustomFee(fee))
    }

    fn on_entity(&mut self, entity: Entity) -> Result<(), ListenerError> {
        self.emit(Mutation::Entity(entity))
    }

    fn on_ethereum_transaction(
        &mut self,
        transaction: EthereumTransaction,
    ) -> Result<(), ListenerError> {
        self.emit(Mutation::EthereumTransaction(transaction))
    }

    fn on_file_data(&mut self, file_data: FileData) -> Result<(), ListenerError> {
        self.emit(Mutation::FileData(file_data))
    }

    fn on_live_hash(&mut self, live_hash: LiveHash) -> Result<(), ListenerError> {
        self.emit(Mutation::LiveHash(live_hash))
    }

    fn on_network_freeze(&mut self, freeze: NetworkFreeze) -> Result<(), ListenerError> {
        self.emit(Mutation::NetworkFreeze(freeze))
    }

    fn on_network_stake(&mut self, stake: NetworkStake) -> Result<(), ListenerError> {
        self.emit(Mutation::NetworkStake(stake))
    }

    fn on_nft(&mut self, nft: Nft) -> Result<(), ListenerError> {
        self.emit(Mutation::Nft(nft))
    }

    fn on_nft_allowance(&mut self, allowance: NftAllowance) -> Result<(), ListenerError> {
        self.emit(Mutation::NftAllowance(allowance))
    }

    fn on_node(&mut self, node: Node) -> Result<(), ListenerError> {
        self.emit(Mutation::Node(node))
    }

    fn on_node_stake(&mut self, stake: NodeStake) -> Result<(), ListenerError> {
        self.emit(Mutation::NodeStake(stake))
    }

    fn on_prng(&mut self, prng: Prng) -> Result<(), ListenerError> {
        self.emit(Mutation::Prng(prng))
    }

    fn on_schedule(&mut self, schedule: Schedule) -> Result<(), ListenerError> {
        self.emit(Mutation::Schedule(schedule))
    }

    fn on_token(&mut self, token: Token) -> Result<(), ListenerError> {
        self.emit(Mutation::Token(token))
    }

    fn on_token_account(&mut self, token_account: TokenAccount) -> Result<(), ListenerError> {
        self.emit(Mutation::TokenAccount(token_account))
    }

    fn on_token_airdrop(&mut self, airdrop: TokenAirdrop) -> Result<(), ListenerError> {
        self.emit(Mutation::TokenAirdrop(airdrop))
    }

    fn on_token_allowance(&mut self, allowance: TokenAllowance) -> Result<(), ListenerError> {
        self.emit(Mutation::TokenAllowance(allowance))
    }

    fn on_topic(&mut self, topic: Topic) -> Result<(), ListenerError> {
        self.emit(Mutation::Topic(topic))
    }

    fn on_topic_message(&mut self, message: TopicMessage) -> Result<(), ListenerError> {
        self.emit(Mutation::TopicMessage(message))
    }

    fn on_transaction(&mut self, transaction: Transaction) -> Result<(), ListenerError> {
        self.emit(Mutation::Transaction(transaction))
    }
}
