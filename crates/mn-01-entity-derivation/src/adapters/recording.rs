//! In-memory listener that keeps every mutation in emission order.
//!
//! Used as the assertion surface of the test suites and by drivers that
//! flush in batches.

use serde::{Deserialize, Serialize};
use shared_types::{
    Contract, ContractResult, CryptoAllowance, CustomFee, Entity, EthereumTransaction, FileData,
    LiveHash, NetworkFreeze, NetworkStake, Nft, NftAllowance, Node, NodeStake, Prng, Schedule,
    Token, TokenAccount, TokenAirdrop, TokenAllowance, Topic, TopicMessage, Transaction,
};

use crate::domain::ListenerError;
use crate::ports::{EntityListener, Mutation};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingListener {
    mutations: Vec<Mutation>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// All mutations in emission order.
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    /// Hand over the recorded mutations, leaving the listener empty.
    pub fn drain(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }

    pub fn clear(&mut self) {
        self.mutations.clear();
    }

    /// Canonical JSON of the recorded stream.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.mutations)
    }
}

impl EntityListener for RecordingListener {
    fn emit(&mut self, mutation: Mutation) -> Result<(), ListenerError> {
        self.mutations.push(mutation);
        Ok(())
    }
}

/// Per-kind views over the recorded stream, in emission order.
macro_rules! recorded {
    ($($name:ident => $variant:ident($ty:ty)),+ $(,)?) => {
        impl RecordingListener {
            $(
                pub fn $name(&self) -> Vec<&$ty> {
                    self.mutations
                        .iter()
                        .filter_map(|mutation| match mutation {
                            Mutation::$variant(value) => Some(value),
                            _ => None,
                        })
                        .collect()
                }
            )+
        }
    };
}

recorded! {
    contracts => Contract(Contract),
    contract_results => ContractResult(ContractResult),
    crypto_allowances => CryptoAllowance(CryptoAllowance),
    custom_fees => CustomFee(CustomFee),
    entities => Entity(Entity),
    ethereum_transactions => EthereumTransaction(EthereumTransaction),
    file_data => FileData(FileData),
    live_hashes => LiveHash(LiveHash),
    network_freezes => NetworkFreeze(NetworkFreeze),
    network_stakes => NetworkStake(NetworkStake),
    nfts => Nft(Nft),
    nft_allowances => NftAllowance(NftAllowance),
    nodes => Node(Node),
    node_stakes => NodeStake(NodeStake),
    prngs => Prng(Prng),
    schedules => Schedule(Schedule),
    tokens => Token(Token),
    token_accounts => TokenAccount(TokenAccount),
    token_airdrops => TokenAirdrop(TokenAirdrop),
    token_allowances => TokenAllowance(TokenAllowance),
    topics => Topic(Topic),
    topic_messages => TopicMessage(TopicMessage),
    transactions => Transaction(Transaction),
}
