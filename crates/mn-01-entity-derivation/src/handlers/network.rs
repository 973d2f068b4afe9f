//! # Network and Utility Handlers
//!
//! Network freezes, end-of-period staking snapshots and PRNG output.

use shared_types::{
    Entropy, EntityId, NetworkFreeze, NetworkStake, NodeStake, Prng, RecordItem, Transaction,
    TransactionType,
};

use super::{HandlerContext, TransactionHandler};
use crate::domain::{epoch_day, freeze_window, Result};
use crate::recoverable_error;

pub struct FreezeHandler;

impl TransactionHandler for FreezeHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::Freeze
    }

    fn entity_id(&self, _ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, Freeze, self.transaction_type());
        Ok(body.update_file.unwrap_or(EntityId::EMPTY))
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
        let body = expect_body!(item, Freeze, self.transaction_type());

        let Some(window) = freeze_window(body, item.consensus_timestamp) else {
            recoverable_error!(
                consensus_timestamp = item.consensus_timestamp,
                "Freeze window out of range"
            );
            return Ok(());
        };
        ctx.listener.on_network_freeze(NetworkFreeze {
            consensus_timestamp: item.consensus_timestamp,
            start_time: window.start_time,
            end_time: window.end_time,
            file_hash: body.file_hash.clone(),
            file_id: body.update_file,
            payer_account_id: item.payer_account_id,
            freeze_type: body.freeze_type,
        })?;
        Ok(())
    }
}

pub struct NodeStakeUpdateHandler;

impl TransactionHandler for NodeStakeUpdateHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::NodeStakeUpdate
    }

    /// The update published on day `D` describes the period that ended on
    /// day `D - 1`.
    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        _transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        if !item.is_successful() {
            return Ok(());
        }
        let body = expect_body!(item, NodeStakeUpdate, self.transaction_type());
        let consensus_timestamp = item.consensus_timestamp;
        let epoch_day = epoch_day(consensus_timestamp) - 1;
        let staking_period = body.end_of_staking_period;

        let mut stake_total: i64 = 0;
        for entry in &body.node_stakes {
            stake_total = stake_total.saturating_add(entry.stake);
            ctx.listener.on_node_stake(NodeStake {
                consensus_timestamp,
                epoch_day,
                node_id: entry.node_id,
                max_stake: entry.max_stake,
                min_stake: entry.min_stake,
                reward_rate: entry.reward_rate,
                stake: entry.stake,
                stake_not_rewarded: entry.stake_not_rewarded,
                stake_rewarded: entry.stake_rewarded,
                staking_period,
            })?;
        }

        ctx.listener.on_network_stake(NetworkStake {
            consensus_timestamp,
            epoch_day,
            max_stake_rewarded: body.max_stake_rewarded,
            max_staking_reward_rate_per_hbar: body.max_staking_reward_rate_per_hbar,
            max_total_reward: body.max_total_reward,
            node_reward_fee_denominator: body.node_reward_fee_fraction.denominator,
            node_reward_fee_numerator: body.node_reward_fee_fraction.numerator,
            reserved_staking_rewards: body.reserved_staking_rewards,
            reward_balance_threshold: body.reward_balance_threshold,
            stake_total,
            staking_period,
            staking_period_duration: body.staking_period,
            staking_periods_stored: body.staking_periods_stored,
            staking_reward_fee_denominator: body.staking_reward_fee_fraction.denominator,
            staking_reward_fee_numerator: body.staking_reward_fee_fraction.numerator,
            staking_reward_rate: body.staking_reward_rate,
            staking_start_threshold: body.staking_start_threshold,
            unreserved_staking_reward_balance: body.unreserved_staking_reward_balance,
        })?;
        Ok(())
    }
}

pub struct UtilPrngHandler;

impl TransactionHandler for UtilPrngHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::UtilPrng
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
        let body = expect_body!(item, UtilPrng, self.transaction_type());

        let mut prng = Prng {
            consensus_timestamp: item.consensus_timestamp,
            payer_account_id: item.payer_account_id,
            range: body.range,
            prng_bytes: None,
            prng_number: None,
        };
        match &item.record.entropy {
            Some(Entropy::Bytes(bytes)) => prng.prng_bytes = Some(bytes.clone()),
            Some(Entropy::Number(number)) => prng.prng_number = Some(*number),
            None => {
                recoverable_error!(
                    consensus_timestamp = item.consensus_timestamp,
                    "PRNG transaction without entropy"
                );
                return Ok(());
            }
        }
        ctx.listener.on_prng(prng)?;
        Ok(())
    }
}
