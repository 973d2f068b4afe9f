//! # Airdrop Handlers
//!
//! Pending airdrops move through `PENDING → CLAIMED | CANCELLED`, keyed by
//! `(sender, receiver, token, serial)`. Gated by `persist.token_airdrops`.

use shared_types::{
    EntityId, PendingAirdropId, PendingAirdropsBody, RecordItem, TokenAccount, TokenAirdrop,
    TokenAirdropState, TokenReference, Transaction, TransactionType,
};

use super::{HandlerContext, TransactionHandler};
use crate::domain::Result;

/// Resolved airdrop key; `None` when either party cannot be resolved.
fn airdrop_key(
    ctx: &mut HandlerContext<'_>,
    id: &PendingAirdropId,
) -> Result<Option<(EntityId, EntityId, EntityId, i64)>> {
    let Some(sender) = ctx.lookup_account_or_log(&id.sender, "airdrop_sender")? else {
        return Ok(None);
    };
    let Some(receiver) = ctx.lookup_account_or_log(&id.receiver, "airdrop_receiver")? else {
        return Ok(None);
    };
    let (token_id, serial_number) = match id.token {
        TokenReference::Fungible(token_id) => (token_id, 0),
        TokenReference::Nft {
            token_id,
            serial_number,
        } => (token_id, serial_number),
    };
    ctx.add_entity_id(sender);
    ctx.add_entity_id(receiver);
    ctx.add_entity_id(token_id);
    Ok(Some((sender, receiver, token_id, serial_number)))
}

pub struct TokenAirdropHandler;

impl TransactionHandler for TokenAirdropHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::TokenAirdrop
    }

    /// Airdrops the receiver could not accept immediately become pending.
    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !item.is_successful() || !ctx.persist().token_airdrops {
            return Ok(());
        }
        expect_body!(item, TokenAirdrop, self.transaction_type());

        for pending in &item.record.new_pending_airdrops {
            let Some((sender, receiver, token_id, serial_number)) =
                airdrop_key(ctx, &pending.pending_airdrop_id)?
            else {
                continue;
            };
            ctx.listener.on_token_airdrop(TokenAirdrop {
                sender_account_id: sender,
                receiver_account_id: receiver,
                token_id,
                serial_number,
                amount: pending.amount,
                state: TokenAirdropState::Pending,
                timestamp_lower: item.consensus_timestamp,
            })?;
        }
        Ok(())
    }
}

fn close_pending_airdrops(
    ctx: &mut HandlerContext<'_>,
    body: &PendingAirdropsBody,
    item: &RecordItem,
    state: TokenAirdropState,
) -> Result<()> {
    for id in &body.pending_airdrops {
        let Some((sender, receiver, token_id, serial_number)) = airdrop_key(ctx, id)? else {
            continue;
        };
        ctx.listener.on_token_airdrop(TokenAirdrop {
            sender_account_id: sender,
            receiver_account_id: receiver,
            token_id,
            serial_number,
            amount: None,
            state,
            timestamp_lower: item.consensus_timestamp,
        })?;

        // Claiming associates the receiver with the token.
        if state == TokenAirdropState::Claimed {
            ctx.listener
                .on_token_account(TokenAccount::associated(receiver, token_id, item.consensus_timestamp))?;
        }
    }
    Ok(())
}

pub struct TokenCancelAirdropHandler;

impl TransactionHandler for TokenCancelAirdropHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::TokenCancelAirdrop
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !item.is_successful() || !ctx.persist().token_airdrops {
            return Ok(());
        }
        let body = expect_body!(item, TokenCancelAirdrop, self.transaction_type());
        close_pending_airdrops(ctx, body, item, TokenAirdropState::Cancelled)
    }
}

pub struct TokenClaimAirdropHandler;

impl TransactionHandler for TokenClaimAirdropHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::TokenClaimAirdrop
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !item.is_successful() || !ctx.persist().token_airdrops {
            return Ok(());
        }
        let body = expect_body!(item, TokenClaimAirdrop, self.transaction_type());
        close_pending_airdrops(ctx, body, item, TokenAirdropState::Claimed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::handlers::test_support::{record_item, Harness};
    use shared_types::{AccountId, PendingAirdropRecord, TokenAirdropBody, TransactionBody};

    const SENDER: i64 = 1001;
    const RECEIVER: i64 = 1002;
    const TOKEN: EntityId = EntityId::num(5005);

    fn pending_id(token: TokenReference) -> PendingAirdropId {
        PendingAirdropId {
            sender: AccountId::num(SENDER),
            receiver: AccountId::num(RECEIVER),
            token,
        }
    }

    fn airdrop_item() -> RecordItem {
        let mut item = record_item(100, TransactionBody::TokenAirdrop(TokenAirdropBody::default()));
        item.record.new_pending_airdrops = vec![
            PendingAirdropRecord {
                pending_airdrop_id: pending_id(TokenReference::Fungible(TOKEN)),
                amount: Some(50),
            },
            PendingAirdropRecord {
                pending_airdrop_id: pending_id(TokenReference::Nft {
                    token_id: EntityId::num(5006),
                    serial_number: 7,
                }),
                amount: None,
            },
        ];
        item
    }

    #[test]
    fn test_airdrop_creates_pending() {
        let mut harness = Harness::new();
        let processed = harness.process(&airdrop_item()).unwrap();

        let airdrops = harness.listener.token_airdrops();
        assert_eq!(airdrops.len(), 2);
        assert_eq!(airdrops[0].state, TokenAirdropState::Pending);
        assert_eq!(airdrops[0].serial_number, 0);
        assert_eq!(airdrops[0].amount, Some(50));
        assert_eq!(airdrops[1].serial_number, 7);
        assert!(airdrops[1].amount.is_none());
        assert!(processed.entity_ids.contains(&EntityId::num(RECEIVER)));
    }

    #[test]
    fn test_airdrops_disabled() {
        let mut config = ParserConfig::default();
        config.persist.token_airdrops = false;
        let mut harness = Harness::with_config(config);
        harness.process(&airdrop_item()).unwrap();
        assert!(harness.listener.token_airdrops().is_empty());
    }

    #[test]
    fn test_claim_associates_receiver() {
        let item = record_item(
            200,
            TransactionBody::TokenClaimAirdrop(PendingAirdropsBody {
                pending_airdrops: vec![pending_id(TokenReference::Fungible(TOKEN))],
            }),
        );
        let mut harness = Harness::new();
        harness.process(&item).unwrap();

        let airdrop = harness.listener.token_airdrops()[0];
        assert_eq!(airdrop.state, TokenAirdropState::Claimed);
        let account = harness.listener.token_accounts()[0];
        assert_eq!(account.account_id, EntityId::num(RECEIVER));
        assert_eq!(account.token_id, TOKEN);
        assert_eq!(account.associated, Some(true));
    }

    #[test]
    fn test_cancel_has_no_association() {
        let item = record_item(
            200,
            TransactionBody::TokenCancelAirdrop(PendingAirdropsBody {
                pending_airdrops: vec![pending_id(TokenReference::Nft {
                    token_id: TOKEN,
                    serial_number: 3,
                })],
            }),
        );
        let mut harness = Harness::new();
        harness.process(&item).unwrap();

        let airdrop = harness.listener.token_airdrops()[0];
        assert_eq!(airdrop.state, TokenAirdropState::Cancelled);
        assert_eq!(airdrop.serial_number, 3);
        assert!(harness.listener.token_accounts().is_empty());
    }
}
