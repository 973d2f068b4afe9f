//! # Fixtures
//!
//! Builders for record items as a record stream reader would hand them
//! over, plus a small mixed stream used by the determinism tests and the
//! benchmarks.

use std::sync::Arc;

use mn_01_entity_derivation::{
    CachedEntityIdService, InMemoryAliasStore, ParserConfig, RecordItemProcessor,
};
use shared_types::{
    AccountAmount, AccountId, ConsensusCreateTopicBody, ConsensusSubmitMessageBody,
    CryptoAllowanceGrant, CryptoApproveAllowanceBody, CryptoCreateAccountBody,
    CryptoTransferBody, EntityId, RecordItem, TokenAssociationBody, TokenCreateBody,
    TokenAssociation, TokenMintBody, TokenType, TransactionBody,
};

pub const PAYER: EntityId = EntityId::num(2);
pub const NODE: EntityId = EntityId::num(3);

/// Resolver type the suites run against.
pub type Resolver = CachedEntityIdService<InMemoryAliasStore>;

/// A processor over a fresh in-memory resolver, plus a handle on that
/// resolver for seeding aliases.
pub fn processor(config: ParserConfig) -> (RecordItemProcessor, Arc<Resolver>) {
    let resolver = Arc::new(CachedEntityIdService::new(InMemoryAliasStore::new()));
    let processor = RecordItemProcessor::new(config, resolver.clone());
    (processor, resolver)
}

/// A successful item paid by [`PAYER`] through [`NODE`].
pub fn item(consensus_timestamp: i64, body: TransactionBody) -> RecordItem {
    RecordItem::new(consensus_timestamp, body)
        .with_payer(PAYER)
        .with_node(NODE)
}

pub fn create_account(consensus_timestamp: i64, num: i64, alias: &[u8]) -> RecordItem {
    let mut item = item(
        consensus_timestamp,
        TransactionBody::CryptoCreateAccount(CryptoCreateAccountBody {
            alias: alias.to_vec(),
            initial_balance: 1_000,
            memo: format!("account {num}"),
            ..Default::default()
        }),
    );
    item.record.receipt.account_id = Some(AccountId::num(num));
    item
}

/// Hbar transfer moving `amount` from the payer to each receiver.
pub fn transfer(consensus_timestamp: i64, receivers: &[AccountId], amount: i64) -> RecordItem {
    let mut transfers = vec![AccountAmount {
        account: AccountId::num(PAYER.num),
        amount: -amount * receivers.len() as i64,
        is_approval: false,
    }];
    transfers.extend(receivers.iter().map(|account| AccountAmount {
        account: account.clone(),
        amount,
        is_approval: false,
    }));
    item(
        consensus_timestamp,
        TransactionBody::CryptoTransfer(CryptoTransferBody {
            transfers,
            ..Default::default()
        }),
    )
}

pub fn create_topic(consensus_timestamp: i64, topic: EntityId) -> RecordItem {
    let mut item = item(
        consensus_timestamp,
        TransactionBody::ConsensusCreateTopic(ConsensusCreateTopicBody {
            admin_key: Some(vec![0xaa; 32]),
            memo: "announcements".into(),
            ..Default::default()
        }),
    );
    item.record.receipt.topic_id = Some(topic);
    item
}

pub fn submit_message(
    consensus_timestamp: i64,
    topic: EntityId,
    sequence_number: i64,
    message: &[u8],
) -> RecordItem {
    let mut item = item(
        consensus_timestamp,
        TransactionBody::ConsensusSubmitMessage(ConsensusSubmitMessageBody {
            topic_id: topic,
            message: message.to_vec(),
            chunk_info: None,
        }),
    );
    item.record.receipt.topic_sequence_number = sequence_number;
    item.record.receipt.topic_running_hash = vec![sequence_number as u8; 48];
    item.record.receipt.topic_running_hash_version = 3;
    item
}

/// Non-fungible token with a supply key, treasury `treasury`.
pub fn create_nft_token(consensus_timestamp: i64, token: EntityId, treasury: i64) -> RecordItem {
    let mut item = item(
        consensus_timestamp,
        TransactionBody::TokenCreation(TokenCreateBody {
            name: "Collectible".into(),
            symbol: "COL".into(),
            treasury: Some(AccountId::num(treasury)),
            supply_key: Some(vec![0xbb; 32]),
            token_type: TokenType::NonFungibleUnique,
            ..Default::default()
        }),
    );
    item.record.receipt.token_id = Some(token);
    item.record.automatic_token_associations = vec![TokenAssociation {
        token_id: token,
        account_id: AccountId::num(treasury),
    }];
    item
}

pub fn associate(consensus_timestamp: i64, account: AccountId, tokens: &[EntityId]) -> RecordItem {
    item(
        consensus_timestamp,
        TransactionBody::TokenAssociate(TokenAssociationBody {
            account,
            tokens: tokens.to_vec(),
        }),
    )
}

pub fn mint_nfts(
    consensus_timestamp: i64,
    token: EntityId,
    serial_numbers: &[i64],
    new_total_supply: i64,
) -> RecordItem {
    let mut item = item(
        consensus_timestamp,
        TransactionBody::TokenMint(TokenMintBody {
            token_id: token,
            amount: 0,
            metadata: serial_numbers
                .iter()
                .map(|serial| format!("ipfs://{serial}").into_bytes())
                .collect(),
        }),
    );
    item.record.receipt.serial_numbers = serial_numbers.to_vec();
    item.record.receipt.new_total_supply = new_total_supply;
    item
}

/// Hbar allowances with explicit owners, in declaration order.
pub fn approve_allowances(consensus_timestamp: i64, grants: &[(i64, i64, i64)]) -> RecordItem {
    item(
        consensus_timestamp,
        TransactionBody::CryptoApproveAllowance(CryptoApproveAllowanceBody {
            crypto_allowances: grants
                .iter()
                .map(|&(owner, spender, amount)| CryptoAllowanceGrant {
                    owner: Some(AccountId::num(owner)),
                    spender: AccountId::num(spender),
                    amount,
                })
                .collect(),
            ..Default::default()
        }),
    )
}

/// Mixed stream of `rounds` repetitions over accounts, topics, tokens and
/// allowances, with strictly increasing timestamps.
pub fn sample_stream(rounds: i64) -> Vec<RecordItem> {
    let mut items = Vec::new();
    let mut timestamp = 1_700_000_000_000_000_000;
    let mut next = || {
        timestamp += 1_000;
        timestamp
    };

    for round in 0..rounds {
        let base = 10_000 + round * 10;
        let alias = [round as u8; 33];
        let topic = EntityId::num(base + 1);
        let token = EntityId::num(base + 2);

        items.push(create_account(next(), base, &alias));
        items.push(transfer(next(), &[AccountId::alias(alias), AccountId::num(98)], 10));
        items.push(create_topic(next(), topic));
        items.push(submit_message(next(), topic, 1, b"hello"));
        items.push(create_nft_token(next(), token, base));
        items.push(mint_nfts(next(), token, &[1, 2, 3], 3));
        items.push(approve_allowances(
            next(),
            &[(base, 98, 5), (base, 99, 7), (base, 98, 11)],
        ));
    }
    items
}
