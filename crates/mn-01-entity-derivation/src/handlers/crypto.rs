//! # Crypto Service Handlers
//!
//! Account lifecycle, live hashes and transfers. Allowances live in
//! [`super::allowance`].

use shared_types::{
    Entity, EntityId, EntityType, LiveHash, RecordItem, Transaction, TransactionType,
    EVM_ADDRESS_LENGTH,
};

use super::{HandlerContext, TransactionHandler};
use crate::domain::{alias_to_evm_address, apply_staking, Result};
use crate::recoverable_error;

pub struct CryptoCreateHandler;

impl TransactionHandler for CryptoCreateHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::CryptoCreateAccount
    }

    fn entity_id(&self, ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        match &item.record.receipt.account_id {
            Some(account_id) => ctx.resolve_account(account_id),
            None => Ok(EntityId::EMPTY),
        }
    }

    fn update_transaction(
        &self,
        _ctx: &mut HandlerContext<'_>,
        transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        let body = expect_body!(item, CryptoCreateAccount, self.transaction_type());
        transaction.initial_balance = Some(body.initial_balance);
        Ok(())
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        item: &RecordItem,
    ) -> Result<()> {
        let body = expect_body!(item, CryptoCreateAccount, self.transaction_type());

        // The record's EVM address wins over anything derived from the alias.
        let alias = if body.alias.is_empty() {
            &item.record.alias
        } else {
            &body.alias
        };
        if !item.record.evm_address.is_empty() {
            entity.evm_address = Some(item.record.evm_address.clone());
        } else if alias.len() == EVM_ADDRESS_LENGTH {
            entity.evm_address = Some(alias.clone());
        }
        if !alias.is_empty() && alias.len() != EVM_ADDRESS_LENGTH {
            entity.alias = Some(alias.clone());
            if entity.evm_address.is_none() {
                entity.evm_address = alias_to_evm_address(alias).map(|address| address.to_vec());
            }
        }

        ctx.set_proxy_account(&mut entity, body.proxy_account.as_ref())?;
        entity.auto_renew_period = body.auto_renew_period;
        entity.entity_type = Some(EntityType::Account);
        entity.key = body.key.clone();
        entity.max_automatic_token_associations = Some(body.max_automatic_token_associations);
        entity.memo = Some(body.memo.clone());
        entity.receiver_sig_required = Some(body.receiver_sig_required);

        let election = ctx.resolve_staking(body.staked_id.as_ref())?;
        apply_staking(&mut entity, election, Some(body.decline_reward), item.consensus_timestamp);

        ctx.notify(&entity);
        ctx.listener.on_entity(entity)?;
        Ok(())
    }
}

pub struct CryptoUpdateHandler;

impl TransactionHandler for CryptoUpdateHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::CryptoUpdateAccount
    }

    fn entity_id(&self, ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, CryptoUpdateAccount, self.transaction_type());
        ctx.resolve_account(&body.account)
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        item: &RecordItem,
    ) -> Result<()> {
        let body = expect_body!(item, CryptoUpdateAccount, self.transaction_type());

        ctx.set_proxy_account(&mut entity, body.proxy_account.as_ref())?;
        entity.auto_renew_period = body.auto_renew_period;
        entity.entity_type = Some(EntityType::Account);
        entity.expiration_timestamp = body.expiration_time;
        entity.key = body.key.clone();
        entity.max_automatic_token_associations = body.max_automatic_token_associations;
        entity.memo = body.memo.clone();
        entity.receiver_sig_required = body.receiver_sig_required;

        let election = ctx.resolve_staking(body.staked_id.as_ref())?;
        apply_staking(&mut entity, election, body.decline_reward, item.consensus_timestamp);

        ctx.listener.on_entity(entity)?;
        Ok(())
    }
}

pub struct CryptoDeleteHandler;

impl TransactionHandler for CryptoDeleteHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::CryptoDelete
    }

    fn entity_id(&self, ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, CryptoDelete, self.transaction_type());
        ctx.resolve_account(&body.delete_account)
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        item: &RecordItem,
    ) -> Result<()> {
        let body = expect_body!(item, CryptoDelete, self.transaction_type());

        let obtainer = match &body.transfer_account {
            Some(account_id) => ctx.lookup_account_or_log(account_id, "transfer_account")?,
            None => {
                recoverable_error!(
                    consensus_timestamp = item.consensus_timestamp,
                    account_id = %entity.id,
                    "Crypto delete without obtainer"
                );
                None
            }
        };
        if let Some(obtainer_id) = obtainer {
            entity.obtainer_id = Some(obtainer_id);
            ctx.add_entity_id(obtainer_id);
        }
        entity.entity_type = Some(EntityType::Account);

        ctx.listener.on_entity(entity)?;
        Ok(())
    }
}

pub struct CryptoAddLiveHashHandler;

impl TransactionHandler for CryptoAddLiveHashHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::CryptoAddLiveHash
    }

    fn entity_id(&self, ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, CryptoAddLiveHash, self.transaction_type());
        ctx.resolve_account(&body.account)
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !item.is_successful() || !ctx.persist().claims {
            return Ok(());
        }
        let body = expect_body!(item, CryptoAddLiveHash, self.transaction_type());
        ctx.listener.on_live_hash(LiveHash {
            consensus_timestamp: item.consensus_timestamp,
            livehash: body.hash.clone(),
        })?;
        Ok(())
    }
}

pub struct CryptoDeleteLiveHashHandler;

impl TransactionHandler for CryptoDeleteLiveHashHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::CryptoDeleteLiveHash
    }

    fn entity_id(&self, ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, CryptoDeleteLiveHash, self.transaction_type());
        ctx.resolve_account(&body.account)
    }
}

pub struct CryptoTransferHandler;

impl TransactionHandler for CryptoTransferHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::CryptoTransfer
    }

    /// Every account and token moved by a successful transfer is referenced.
    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !item.is_successful() {
            return Ok(());
        }
        let body = expect_body!(item, CryptoTransfer, self.transaction_type());

        for transfer in &body.transfers {
            if let Some(account_id) = ctx.lookup_account_or_log(&transfer.account, "transfer")? {
                ctx.add_entity_id(account_id);
            }
        }
        for token_transfers in &body.token_transfers {
            ctx.add_entity_id(token_transfers.token_id);
            for transfer in &token_transfers.transfers {
                if let Some(account_id) = ctx.lookup_account_or_log(&transfer.account, "token_transfer")? {
                    ctx.add_entity_id(account_id);
                }
            }
            for nft in &token_transfers.nft_transfers {
                for account in [&nft.sender, &nft.receiver] {
                    if account.is_default() {
                        continue;
                    }
                    if let Some(account_id) = ctx.lookup_account_or_log(account, "nft_transfer")? {
                        ctx.add_entity_id(account_id);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ParserConfig, PartialDataAction};
    use crate::domain::ParserError;
    use crate::handlers::test_support::{record_item, Harness, NODE, PAYER};
    use shared_types::{
        AccountAmount, AccountId, CryptoAddLiveHashBody, CryptoCreateAccountBody,
        CryptoDeleteBody, CryptoTransferBody, CryptoUpdateAccountBody, NftTransfer, StakedId,
        TokenTransferList, TransactionBody,
    };

    const ACCOUNT: EntityId = EntityId::num(3001);
    const DAY: i64 = 86_400 * 1_000_000_000;

    fn create_item(alias: Vec<u8>) -> RecordItem {
        let mut item = record_item(
            10 * DAY,
            TransactionBody::CryptoCreateAccount(CryptoCreateAccountBody {
                key: Some(vec![1; 4]),
                alias,
                initial_balance: 500,
                memo: "acct".into(),
                max_automatic_token_associations: 10,
                staked_id: Some(StakedId::Account(AccountId::num(800))),
                ..Default::default()
            }),
        );
        item.record.receipt.account_id = Some(AccountId::num(ACCOUNT.num));
        item
    }

    fn secp256k1_generator_alias() -> Vec<u8> {
        let mut alias = vec![0x3A, 0x21, 0x02];
        alias.extend(
            hex::decode("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
                .unwrap(),
        );
        alias
    }

    #[test]
    fn test_create_account() {
        let mut harness = Harness::new();
        let processed = harness.process(&create_item(Vec::new())).unwrap();

        let entity = harness.listener.entities()[0];
        assert_eq!(entity.id, ACCOUNT);
        assert_eq!(entity.entity_type, Some(EntityType::Account));
        assert_eq!(entity.max_automatic_token_associations, Some(10));
        assert_eq!(entity.staked_account_id, Some(EntityId::num(800)));
        assert_eq!(entity.staked_node_id, Some(-1));
        assert_eq!(entity.stake_period_start, Some(10));
        assert!(entity.alias.is_none());
        assert!(entity.evm_address.is_none());
        assert_eq!(harness.listener.transactions()[0].initial_balance, Some(500));
        assert_eq!(processed.entity_ids, vec![ACCOUNT, NODE, PAYER, EntityId::num(800)]);
    }

    #[test]
    fn test_create_with_ecdsa_alias_derives_evm_address() {
        let alias = secp256k1_generator_alias();
        let mut harness = Harness::new();
        harness.process(&create_item(alias.clone())).unwrap();

        let entity = harness.listener.entities()[0];
        assert_eq!(entity.alias, Some(alias));
        assert_eq!(
            entity.evm_address.as_deref().map(hex::encode).as_deref(),
            Some("7e5f4552091a69125d5dfcb7b8c2659029395bdf")
        );
        assert_eq!(harness.resolver.notified.lock()[0].id, ACCOUNT);
    }

    #[test]
    fn test_create_with_evm_address_alias() {
        let mut harness = Harness::new();
        harness.process(&create_item(vec![0x44; 20])).unwrap();

        let entity = harness.listener.entities()[0];
        assert!(entity.alias.is_none());
        assert_eq!(entity.evm_address, Some(vec![0x44; 20]));
    }

    #[test]
    fn test_create_unresolvable_staked_account_throws() {
        let mut item = create_item(Vec::new());
        if let TransactionBody::CryptoCreateAccount(body) = &mut item.body {
            body.staked_id = Some(StakedId::Account(AccountId::alias(vec![8u8; 33])));
        }
        let mut harness =
            Harness::with_config(ParserConfig::default().with_partial_data_action(PartialDataAction::Throw));
        let err = harness.process(&item).unwrap_err();
        assert!(matches!(err, ParserError::AliasNotFound { .. }));
        assert!(harness.listener.transactions().is_empty());
    }

    #[test]
    fn test_update_account_is_sparse() {
        let item = record_item(
            5 * DAY,
            TransactionBody::CryptoUpdateAccount(CryptoUpdateAccountBody {
                account: AccountId::num(ACCOUNT.num),
                key: None,
                auto_renew_period: None,
                expiration_time: Some(99),
                memo: None,
                receiver_sig_required: Some(true),
                max_automatic_token_associations: None,
                decline_reward: None,
                staked_id: Some(StakedId::Node(3)),
                proxy_account: None,
            }),
        );
        let mut harness = Harness::new();
        harness.process(&item).unwrap();

        let entity = harness.listener.entities()[0];
        assert_eq!(entity.expiration_timestamp, Some(99));
        assert_eq!(entity.receiver_sig_required, Some(true));
        assert_eq!(entity.staked_node_id, Some(3));
        assert_eq!(entity.staked_account_id, Some(EntityId::EMPTY));
        assert_eq!(entity.stake_period_start, Some(5));
        assert!(entity.memo.is_none());
        assert!(entity.key.is_none());
        assert!(entity.decline_reward.is_none());
    }

    #[test]
    fn test_delete_without_obtainer_is_recoverable() {
        let item = record_item(
            100,
            TransactionBody::CryptoDelete(CryptoDeleteBody {
                delete_account: AccountId::num(ACCOUNT.num),
                transfer_account: None,
            }),
        );
        let mut harness = Harness::new();
        harness.process(&item).unwrap();

        let entity = harness.listener.entities()[0];
        assert_eq!(entity.deleted, Some(true));
        assert!(entity.obtainer_id.is_none());
    }

    #[test]
    fn test_delete_with_obtainer() {
        let item = record_item(
            100,
            TransactionBody::CryptoDelete(CryptoDeleteBody {
                delete_account: AccountId::num(ACCOUNT.num),
                transfer_account: Some(AccountId::num(77)),
            }),
        );
        let mut harness = Harness::new();
        let processed = harness.process(&item).unwrap();
        assert_eq!(harness.listener.entities()[0].obtainer_id, Some(EntityId::num(77)));
        assert!(processed.entity_ids.contains(&EntityId::num(77)));
    }

    #[test]
    fn test_live_hash_requires_claims() {
        let item = record_item(
            100,
            TransactionBody::CryptoAddLiveHash(CryptoAddLiveHashBody {
                account: AccountId::num(ACCOUNT.num),
                hash: vec![5; 48],
                keys: Vec::new(),
                duration: 30,
            }),
        );
        let mut harness = Harness::new();
        harness.process(&item).unwrap();
        assert!(harness.listener.live_hashes().is_empty());

        let mut config = ParserConfig::default();
        config.persist.claims = true;
        let mut harness = Harness::with_config(config);
        harness.process(&item).unwrap();
        assert_eq!(harness.listener.live_hashes()[0].livehash, vec![5; 48]);
    }

    #[test]
    fn test_transfer_references_accounts_and_tokens() {
        let item = record_item(
            100,
            TransactionBody::CryptoTransfer(CryptoTransferBody {
                transfers: vec![
                    AccountAmount {
                        account: AccountId::num(PAYER.num),
                        amount: -10,
                        is_approval: false,
                    },
                    AccountAmount {
                        account: AccountId::num(50),
                        amount: 10,
                        is_approval: false,
                    },
                ],
                token_transfers: vec![TokenTransferList {
                    token_id: EntityId::num(60),
                    transfers: Vec::new(),
                    nft_transfers: vec![NftTransfer {
                        sender: AccountId::num(51),
                        receiver: AccountId::num(52),
                        serial_number: 1,
                        is_approval: false,
                    }],
                }],
            }),
        );
        let mut harness = Harness::new();
        let processed = harness.process(&item).unwrap();
        assert_eq!(
            processed.entity_ids,
            vec![
                NODE,
                PAYER,
                EntityId::num(50),
                EntityId::num(60),
                EntityId::num(51),
                EntityId::num(52)
            ]
        );
        assert!(harness.listener.entities().is_empty());
    }
}
