//! # Allowance Handlers
//!
//! Approve and adjust share one body and one reconciliation: each batch is
//! reduced with [`reconcile_last_wins`] so the last declared entry per key
//! is the only one emitted. An owner left unset means the payer; an owner
//! or spender that cannot be resolved drops its entry.

use shared_types::{
    AccountId, CryptoAllowance, CryptoApproveAllowanceBody, EntityId, Nft, NftAllowance,
    NftAllowanceGrant, RecordItem, TokenAllowance, Transaction, TransactionBody, TransactionType,
};

use super::{HandlerContext, TransactionHandler};
use crate::domain::{reconcile_last_wins, ParserError, Result};
use crate::recoverable_error;

/// Handler for `CryptoApproveAllowance` and `CryptoAdjustAllowance`.
pub struct CryptoAllowanceHandler(pub TransactionType);

impl CryptoAllowanceHandler {
    fn body<'i>(&self, item: &'i RecordItem) -> Result<&'i CryptoApproveAllowanceBody> {
        match &item.body {
            TransactionBody::CryptoApproveAllowance(body)
            | TransactionBody::CryptoAdjustAllowance(body)
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

    fn crypto_allowances(
        &self,
        ctx: &mut HandlerContext<'_>,
        body: &CryptoApproveAllowanceBody,
        item: &RecordItem,
    ) -> Result<()> {
        let survivors = reconcile_last_wins(&body.crypto_allowances, |grant| {
            let Some(owner) = resolve_owner(ctx, grant.owner.as_ref(), item)? else {
                return Ok::<_, ParserError>(None);
            };
            let Some(spender) = resolve_party(ctx, &grant.spender, "spender", item)? else {
                return Ok(None);
            };
            Ok(Some((owner, spender)))
        })?;

        for ((owner, spender), grant) in survivors {
            ctx.add_entity_id(owner);
            ctx.add_entity_id(spender);
            ctx.listener.on_crypto_allowance(CryptoAllowance {
                owner,
                spender,
                amount: grant.amount,
                amount_granted: grant.amount,
                payer_account_id: item.payer_account_id,
                timestamp_lower: item.consensus_timestamp,
            })?;
        }
        Ok(())
    }

    fn token_allowances(
        &self,
        ctx: &mut HandlerContext<'_>,
        body: &CryptoApproveAllowanceBody,
        item: &RecordItem,
    ) -> Result<()> {
        let survivors = reconcile_last_wins(&body.token_allowances, |grant| {
            let Some(owner) = resolve_owner(ctx, grant.owner.as_ref(), item)? else {
                return Ok::<_, ParserError>(None);
            };
            let Some(spender) = resolve_party(ctx, &grant.spender, "spender", item)? else {
                return Ok(None);
            };
            Ok(Some((owner, spender, grant.token_id)))
        })?;

        for ((owner, spender, token_id), grant) in survivors {
            ctx.add_entity_id(owner);
            ctx.add_entity_id(spender);
            ctx.add_entity_id(token_id);
            ctx.listener.on_token_allowance(TokenAllowance {
                owner,
                spender,
                token_id,
                amount: grant.amount,
                amount_granted: grant.amount,
                payer_account_id: item.payer_account_id,
                timestamp_lower: item.consensus_timestamp,
            })?;
        }
        Ok(())
    }

    /// Approved-for-all grants become NFT allowances; serial grants set the
    /// spender of each NFT. Both are reconciled independently.
    fn nft_allowances(
        &self,
        ctx: &mut HandlerContext<'_>,
        body: &CryptoApproveAllowanceBody,
        item: &RecordItem,
    ) -> Result<()> {
        let mut resolved = Vec::with_capacity(body.nft_allowances.len());
        for grant in &body.nft_allowances {
            let Some(owner) = resolve_owner(ctx, grant.owner.as_ref(), item)? else {
                continue;
            };
            let Some(spender) = resolve_party(ctx, &grant.spender, "spender", item)? else {
                continue;
            };
            let delegating_spender = match &grant.delegating_spender {
                Some(account_id) => ctx
                    .lookup_account_or_log(account_id, "delegating_spender")?
                    .unwrap_or(EntityId::EMPTY),
                None => EntityId::EMPTY,
            };
            resolved.push(ResolvedNftGrant {
                grant,
                owner,
                spender,
                delegating_spender,
            });
        }

        let approvals = reconcile_last_wins(&resolved, |entry| {
            Ok::<_, ParserError>(
                entry
                    .grant
                    .approved_for_all
                    .map(|_| (entry.owner, entry.spender, entry.grant.token_id)),
            )
        })?;
        for ((owner, spender, token_id), entry) in approvals {
            ctx.add_entity_id(owner);
            ctx.add_entity_id(spender);
            ctx.add_entity_id(token_id);
            ctx.listener.on_nft_allowance(NftAllowance {
                owner,
                spender,
                token_id,
                approved_for_all: entry.grant.approved_for_all.unwrap_or_default(),
                payer_account_id: item.payer_account_id,
                timestamp_lower: item.consensus_timestamp,
            })?;
        }

        let serials: Vec<(&ResolvedNftGrant<'_>, i64)> = resolved
            .iter()
            .flat_map(|entry| entry.grant.serial_numbers.iter().map(move |serial| (entry, *serial)))
            .collect();
        let serial_grants = reconcile_last_wins(&serials, |(entry, serial)| {
            Ok::<_, ParserError>(Some((entry.grant.token_id, *serial)))
        })?;
        for ((token_id, serial_number), (entry, _)) in serial_grants {
            ctx.add_entity_id(entry.owner);
            ctx.add_entity_id(entry.spender);
            ctx.add_entity_id(entry.delegating_spender);
            ctx.add_entity_id(token_id);
            let mut nft = Nft::new(token_id, serial_number, item.consensus_timestamp);
            nft.spender = Some(entry.spender);
            nft.delegating_spender = Some(entry.delegating_spender);
            ctx.listener.on_nft(nft)?;
        }
        Ok(())
    }
}

struct ResolvedNftGrant<'g> {
    grant: &'g NftAllowanceGrant,
    owner: EntityId,
    spender: EntityId,
    delegating_spender: EntityId,
}

impl TransactionHandler for CryptoAllowanceHandler {
    fn transaction_type(&self) -> TransactionType {
        self.0
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !item.is_successful() {
            return Ok(());
        }
        let body = self.body(item)?;

        self.crypto_allowances(ctx, body, item)?;
        if ctx.persist().tokens {
            self.nft_allowances(ctx, body, item)?;
            self.token_allowances(ctx, body, item)?;
        }
        Ok(())
    }
}

pub struct CryptoDeleteAllowanceHandler;

impl TransactionHandler for CryptoDeleteAllowanceHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::CryptoDeleteAllowance
    }

    /// Clears the spender of every listed serial.
    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !item.is_successful() || !ctx.persist().tokens {
            return Ok(());
        }
        let body = expect_body!(item, CryptoDeleteAllowance, self.transaction_type());

        for removal in &body.nft_allowances {
            let Some(owner) = resolve_owner(ctx, removal.owner.as_ref(), item)? else {
                continue;
            };
            ctx.add_entity_id(owner);
            ctx.add_entity_id(removal.token_id);
            for serial_number in &removal.serial_numbers {
                let mut nft = Nft::new(removal.token_id, *serial_number, item.consensus_timestamp);
                nft.spender = Some(EntityId::EMPTY);
                nft.delegating_spender = Some(EntityId::EMPTY);
                ctx.listener.on_nft(nft)?;
            }
        }
        Ok(())
    }
}

/// Effective owner of a grant; an unset owner is the payer.
fn resolve_owner(
    ctx: &HandlerContext<'_>,
    owner: Option<&AccountId>,
    item: &RecordItem,
) -> Result<Option<EntityId>> {
    match owner {
        Some(account_id) if !account_id.is_default() => resolve_party(ctx, account_id, "owner", item),
        _ => Ok(Some(item.payer_account_id)),
    }
}

fn resolve_party(
    ctx: &HandlerContext<'_>,
    account_id: &AccountId,
    field: &'static str,
    item: &RecordItem,
) -> Result<Option<EntityId>> {
    let resolved = ctx.resolve_account(account_id)?;
    if resolved.is_empty() {
        recoverable_error!(
            consensus_timestamp = item.consensus_timestamp,
            field,
            "Empty allowance party, skipping entry"
        );
        return Ok(None);
    }
    Ok(Some(resolved))
}
