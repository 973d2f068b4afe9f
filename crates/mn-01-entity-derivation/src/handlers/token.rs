//! # Token Service Handlers
//!
//! Token lifecycle, supply changes, token-account relationships and NFT
//! metadata. Every row here is gated by `persist.tokens` and only derived
//! from successful transactions.
//!
//! Supply-changing transactions take the total supply from the receipt,
//! never from arithmetic over the body.

use std::collections::HashSet;

use shared_types::{
    AccountId, Entity, EntityId, EntityType, HapiVersion, Nft, RecordItem, Token,
    TokenAccount, TokenAccountBody, TokenFreezeStatus, TokenKycStatus, TokenPauseStatus,
    TokenReference, Transaction, TransactionBody, TransactionType,
};

use super::fees::build_fee_schedule;
use super::{HandlerContext, TransactionHandler};
use crate::domain::{ParserError, Result};

/// Whether `item` should produce token rows at all.
fn derives_tokens(ctx: &HandlerContext<'_>, item: &RecordItem) -> bool {
    item.is_successful() && ctx.persist().tokens
}

/// Token row carrying only the receipt's new total supply.
fn supply_update(token_id: EntityId, item: &RecordItem) -> Token {
    let mut token = Token::new(token_id, item.consensus_timestamp);
    token.total_supply = Some(item.record.receipt.new_total_supply);
    token
}

pub struct TokenCreateHandler;

impl TokenCreateHandler {
    /// Accounts associated with the new token: treasury and fee collectors,
    /// or the record's own list from 0.27.0 on.
    fn auto_associated_accounts(
        &self,
        ctx: &mut HandlerContext<'_>,
        item: &RecordItem,
        token_id: EntityId,
        treasury: Option<EntityId>,
        collectors: Vec<EntityId>,
    ) -> Result<Vec<EntityId>> {
        let candidates = if item.hapi_version.is_less_than(HapiVersion::V0_27_0) {
            treasury.into_iter().chain(collectors).collect::<Vec<_>>()
        } else {
            let mut accounts = Vec::new();
            for association in &item.record.automatic_token_associations {
                if association.token_id != token_id {
                    continue;
                }
                if let Some(account_id) =
                    ctx.lookup_account_or_log(&association.account_id, "automatic_association")?
                {
                    accounts.push(account_id);
                }
            }
            accounts
        };

        let mut seen = HashSet::new();
        Ok(candidates
            .into_iter()
            .filter(|account_id| seen.insert(*account_id))
            .collect())
    }
}

impl TransactionHandler for TokenCreateHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::TokenCreation
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        Ok(item.record.receipt.token_id.unwrap_or(EntityId::EMPTY))
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        item: &RecordItem,
    ) -> Result<()> {
        if !ctx.persist().tokens {
            return Ok(());
        }
        let body = expect_body!(item, TokenCreation, self.transaction_type());
        let token_id = entity.id;
        let timestamp = item.consensus_timestamp;

        ctx.set_auto_renew_account(&mut entity, body.auto_renew_account.as_ref())?;
        entity.auto_renew_period = body.auto_renew_period;
        entity.entity_type = Some(EntityType::Token);
        entity.expiration_timestamp = body.expiry;
        entity.key = body.admin_key.clone();
        entity.memo = Some(body.memo.clone());

        let treasury = match &body.treasury {
            Some(account_id) => ctx.lookup_account_or_log(account_id, "treasury")?,
            None => None,
        };
        if let Some(treasury_id) = treasury {
            ctx.add_entity_id(treasury_id);
        }

        let freeze_status = match (&body.freeze_key, body.freeze_default) {
            (None, _) => TokenFreezeStatus::NotApplicable,
            (Some(_), true) => TokenFreezeStatus::Frozen,
            (Some(_), false) => TokenFreezeStatus::Unfrozen,
        };
        let kyc_status = match body.kyc_key {
            Some(_) => TokenKycStatus::Revoked,
            None => TokenKycStatus::NotApplicable,
        };

        let token = Token {
            token_id,
            created_timestamp: Some(timestamp),
            decimals: Some(body.decimals),
            fee_schedule_key: body.fee_schedule_key.clone(),
            freeze_default: Some(body.freeze_default),
            freeze_key: body.freeze_key.clone(),
            initial_supply: Some(body.initial_supply),
            kyc_key: body.kyc_key.clone(),
            max_supply: Some(body.max_supply),
            metadata: Some(body.metadata.clone()),
            metadata_key: body.metadata_key.clone(),
            name: Some(body.name.clone()),
            pause_key: body.pause_key.clone(),
            pause_status: Some(match body.pause_key {
                Some(_) => TokenPauseStatus::Unpaused,
                None => TokenPauseStatus::NotApplicable,
            }),
            supply_key: body.supply_key.clone(),
            supply_type: Some(body.supply_type),
            symbol: Some(body.symbol.clone()),
            timestamp_lower: timestamp,
            total_supply: Some(body.initial_supply),
            treasury_account_id: treasury,
            token_type: Some(body.token_type),
            wipe_key: body.wipe_key.clone(),
        };

        let fees = build_fee_schedule(ctx, token_id, &body.custom_fees, true)?;
        let accounts =
            self.auto_associated_accounts(ctx, item, token_id, treasury, fees.auto_associated)?;

        ctx.listener.on_entity(entity)?;
        ctx.listener.on_token(token)?;
        ctx.listener.on_custom_fee(fees.custom_fee)?;
        for account_id in accounts {
            let mut token_account = TokenAccount::associated(account_id, token_id, timestamp);
            // The treasury is exempt from its own token's freeze and KYC.
            if Some(account_id) == treasury {
                token_account.freeze_status = Some(match freeze_status {
                    TokenFreezeStatus::NotApplicable => TokenFreezeStatus::NotApplicable,
                    _ => TokenFreezeStatus::Unfrozen,
                });
                token_account.kyc_status = Some(match kyc_status {
                    TokenKycStatus::NotApplicable => TokenKycStatus::NotApplicable,
                    _ => TokenKycStatus::Granted,
                });
            } else {
                token_account.freeze_status = Some(freeze_status);
                token_account.kyc_status = Some(kyc_status);
            }
            ctx.add_entity_id(account_id);
            ctx.listener.on_token_account(token_account)?;
        }
        Ok(())
    }
}

pub struct TokenUpdateHandler;

impl TransactionHandler for TokenUpdateHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::TokenUpdate
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, TokenUpdate, self.transaction_type());
        Ok(body.token_id)
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        item: &RecordItem,
    ) -> Result<()> {
        if !ctx.persist().tokens {
            return Ok(());
        }
        let body = expect_body!(item, TokenUpdate, self.transaction_type());

        ctx.set_auto_renew_account(&mut entity, body.auto_renew_account.as_ref())?;
        entity.auto_renew_period = body.auto_renew_period;
        entity.entity_type = Some(EntityType::Token);
        entity.expiration_timestamp = body.expiry;
        entity.key = body.admin_key.clone();
        entity.memo = body.memo.clone();

        let mut token = Token::new(entity.id, item.consensus_timestamp);
        token.fee_schedule_key = body.fee_schedule_key.clone();
        token.freeze_key = body.freeze_key.clone();
        token.kyc_key = body.kyc_key.clone();
        token.metadata = body.metadata.clone();
        token.metadata_key = body.metadata_key.clone();
        token.name = body.name.clone();
        token.pause_key = body.pause_key.clone();
        token.supply_key = body.supply_key.clone();
        token.symbol = body.symbol.clone();
        token.wipe_key = body.wipe_key.clone();
        if let Some(treasury) = &body.treasury {
            if let Some(treasury_id) = ctx.lookup_account_or_log(treasury, "treasury")? {
                token.treasury_account_id = Some(treasury_id);
                ctx.add_entity_id(treasury_id);
            }
        }

        ctx.listener.on_entity(entity)?;
        ctx.listener.on_token(token)?;
        Ok(())
    }
}

pub struct TokenDeleteHandler;

impl TransactionHandler for TokenDeleteHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::TokenDeletion
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, TokenDeletion, self.transaction_type());
        Ok(body.token_id)
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        _item: &RecordItem,
    ) -> Result<()> {
        if !ctx.persist().tokens {
            return Ok(());
        }
        entity.entity_type = Some(EntityType::Token);
        ctx.listener.on_entity(entity)?;
        Ok(())
    }
}

pub struct TokenMintHandler;

impl TransactionHandler for TokenMintHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::TokenMint
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, TokenMint, self.transaction_type());
        Ok(body.token_id)
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !derives_tokens(ctx, item) {
            return Ok(());
        }
        let body = expect_body!(item, TokenMint, self.transaction_type());
        let serial_numbers = &item.record.receipt.serial_numbers;
        if serial_numbers.len() != body.metadata.len() && !serial_numbers.is_empty() {
            return Err(ParserError::InvalidDataset(format!(
                "Minted {} serials with {} metadata entries for token {}",
                serial_numbers.len(),
                body.metadata.len(),
                body.token_id
            )));
        }

        ctx.listener.on_token(supply_update(body.token_id, item))?;
        for (serial_number, metadata) in serial_numbers.iter().zip(&body.metadata) {
            let mut nft = Nft::new(body.token_id, *serial_number, item.consensus_timestamp);
            nft.created_timestamp = Some(item.consensus_timestamp);
            nft.deleted = Some(false);
            nft.metadata = Some(metadata.clone());
            ctx.listener.on_nft(nft)?;
        }
        Ok(())
    }
}

pub struct TokenBurnHandler;

impl TransactionHandler for TokenBurnHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::TokenBurn
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, TokenBurn, self.transaction_type());
        Ok(body.token_id)
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !derives_tokens(ctx, item) {
            return Ok(());
        }
        let body = expect_body!(item, TokenBurn, self.transaction_type());
        ctx.listener.on_token(supply_update(body.token_id, item))?;
        emit_deleted_nfts(ctx, body.token_id, &body.serial_numbers, item)
    }
}

pub struct TokenWipeHandler;

impl TransactionHandler for TokenWipeHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::TokenWipe
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, TokenWipe, self.transaction_type());
        Ok(body.token_id)
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !derives_tokens(ctx, item) {
            return Ok(());
        }
        let body = expect_body!(item, TokenWipe, self.transaction_type());
        let account_id = ctx.resolve_account(&body.account)?;
        ctx.add_entity_id(account_id);

        ctx.listener.on_token(supply_update(body.token_id, item))?;
        emit_deleted_nfts(ctx, body.token_id, &body.serial_numbers, item)
    }
}

fn emit_deleted_nfts(
    ctx: &mut HandlerContext<'_>,
    token_id: EntityId,
    serial_numbers: &[i64],
    item: &RecordItem,
) -> Result<()> {
    for serial_number in serial_numbers {
        let mut nft = Nft::new(token_id, *serial_number, item.consensus_timestamp);
        nft.deleted = Some(true);
        ctx.listener.on_nft(nft)?;
    }
    Ok(())
}

pub struct TokenAssociateHandler;

impl TransactionHandler for TokenAssociateHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::TokenAssociate
    }

    fn entity_id(&self, ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, TokenAssociate, self.transaction_type());
        ctx.resolve_account(&body.account)
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !derives_tokens(ctx, item) {
            return Ok(());
        }
        let body = expect_body!(item, TokenAssociate, self.transaction_type());
        let Some(account_id) = transaction.entity_id else {
            return Ok(());
        };
        for token_id in &body.tokens {
            ctx.add_entity_id(*token_id);
            ctx.listener
                .on_token_account(TokenAccount::associated(account_id, *token_id, item.consensus_timestamp))?;
        }
        Ok(())
    }
}

pub struct TokenDissociateHandler;

impl TransactionHandler for TokenDissociateHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::TokenDissociate
    }

    fn entity_id(&self, ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, TokenDissociate, self.transaction_type());
        ctx.resolve_account(&body.account)
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !derives_tokens(ctx, item) {
            return Ok(());
        }
        let body = expect_body!(item, TokenDissociate, self.transaction_type());
        let Some(account_id) = transaction.entity_id else {
            return Ok(());
        };
        for token_id in &body.tokens {
            let mut token_account = TokenAccount::new(account_id, *token_id, item.consensus_timestamp);
            token_account.associated = Some(false);
            ctx.add_entity_id(*token_id);
            ctx.listener.on_token_account(token_account)?;
        }
        Ok(())
    }
}

/// Freeze, unfreeze, grant KYC and revoke KYC share one body and differ
/// only in the status they set.
pub struct TokenAccountStatusHandler(pub TransactionType);

impl TokenAccountStatusHandler {
    fn body<'i>(&self, item: &'i RecordItem) -> Result<&'i TokenAccountBody> {
        match &item.body {
            TransactionBody::TokenFreeze(body)
            | TransactionBody::TokenUnfreeze(body)
            | TransactionBody::TokenGrantKyc(body)
            | TransactionBody::TokenRevokeKyc(body)
                if item.transaction_type() == self.0 =>
            {
                Ok(body)
            }
            other => Err(ParserError::BodyMismatch {
                expected: self.0,
                actual: other.transaction_type(),
            }),
        }
    }

    fn apply(&self, token_account: &mut TokenAccount) {
        match self.0 {
            TransactionType::TokenFreeze => token_account.freeze_status = Some(TokenFreezeStatus::Frozen),
            TransactionType::TokenUnfreeze => {
                token_account.freeze_status = Some(TokenFreezeStatus::Unfrozen)
            }
            TransactionType::TokenGrantKyc => token_account.kyc_status = Some(TokenKycStatus::Granted),
            TransactionType::TokenRevokeKyc => token_account.kyc_status = Some(TokenKycStatus::Revoked),
            _ => {}
        }
    }
}

impl TransactionHandler for TokenAccountStatusHandler {
    fn transaction_type(&self) -> TransactionType {
        self.0
    }

    fn entity_id(&self, ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        ctx.resolve_account(&self.body(item)?.account)
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !derives_tokens(ctx, item) {
            return Ok(());
        }
        let body = self.body(item)?;
        let Some(account_id) = transaction.entity_id else {
            return Ok(());
        };
        let mut token_account = TokenAccount::new(account_id, body.token_id, item.consensus_timestamp);
        self.apply(&mut token_account);
        ctx.add_entity_id(body.token_id);
        ctx.listener.on_token_account(token_account)?;
        Ok(())
    }
}

pub struct TokenPauseHandler;

impl TransactionHandler for TokenPauseHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::TokenPause
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, TokenPause, self.transaction_type());
        Ok(body.token_id)
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !derives_tokens(ctx, item) {
            return Ok(());
        }
        let body = expect_body!(item, TokenPause, self.transaction_type());
        let mut token = Token::new(body.token_id, item.consensus_timestamp);
        token.pause_status = Some(TokenPauseStatus::Paused);
        ctx.listener.on_token(token)?;
        Ok(())
    }
}

pub struct TokenUnpauseHandler;

impl TransactionHandler for TokenUnpauseHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::TokenUnpause
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, TokenUnpause, self.transaction_type());
        Ok(body.token_id)
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !derives_tokens(ctx, item) {
            return Ok(());
        }
        let body = expect_body!(item, TokenUnpause, self.transaction_type());
        let mut token = Token::new(body.token_id, item.consensus_timestamp);
        token.pause_status = Some(TokenPauseStatus::Unpaused);
        ctx.listener.on_token(token)?;
        Ok(())
    }
}

pub struct TokenFeeScheduleUpdateHandler;

impl TransactionHandler for TokenFeeScheduleUpdateHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::TokenFeeScheduleUpdate
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, TokenFeeScheduleUpdate, self.transaction_type());
        Ok(body.token_id)
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !derives_tokens(ctx, item) {
            return Ok(());
        }
        let body = expect_body!(item, TokenFeeScheduleUpdate, self.transaction_type());
        let fees = build_fee_schedule(ctx, body.token_id, &body.custom_fees, false)?;
        ctx.listener.on_custom_fee(fees.custom_fee)?;
        Ok(())
    }
}

pub struct TokenUpdateNftsHandler;

impl TransactionHandler for TokenUpdateNftsHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::TokenUpdateNfts
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, TokenUpdateNfts, self.transaction_type());
        Ok(body.token_id)
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !derives_tokens(ctx, item) {
            return Ok(());
        }
        let body = expect_body!(item, TokenUpdateNfts, self.transaction_type());
        let Some(metadata) = &body.metadata else {
            return Ok(());
        };
        for serial_number in &body.serial_numbers {
            let mut nft = Nft::new(body.token_id, *serial_number, item.consensus_timestamp);
            nft.metadata = Some(metadata.clone());
            ctx.listener.on_nft(nft)?;
        }
        Ok(())
    }
}

pub struct TokenRejectHandler;

impl TransactionHandler for TokenRejectHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::TokenReject
    }

    fn entity_id(&self, ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, TokenReject, self.transaction_type());
        owner_or_payer(ctx, body.owner.as_ref(), item)
    }

    /// Rejected NFTs return to the treasury with their approvals cleared.
    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !derives_tokens(ctx, item) {
            return Ok(());
        }
        let body = expect_body!(item, TokenReject, self.transaction_type());
        for rejection in &body.rejections {
            match rejection {
                TokenReference::Fungible(token_id) => ctx.add_entity_id(*token_id),
                TokenReference::Nft {
                    token_id,
                    serial_number,
                } => {
                    ctx.add_entity_id(*token_id);
                    let mut nft = Nft::new(*token_id, *serial_number, item.consensus_timestamp);
                    nft.spender = Some(EntityId::EMPTY);
                    nft.delegating_spender = Some(EntityId::EMPTY);
                    ctx.listener.on_nft(nft)?;
                }
            }
        }
        Ok(())
    }
}

/// Owner of a token-scoped action that defaults to the payer.
fn owner_or_payer(ctx: &HandlerContext<'_>, owner: Option<&AccountId>, item: &RecordItem) -> Result<EntityId> {
    match owner {
        Some(owner) if !owner.is_default() => ctx.resolve_account(owner),
        _ => Ok(item.payer_account_id),
    }
}
