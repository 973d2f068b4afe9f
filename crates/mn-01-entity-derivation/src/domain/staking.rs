//! # Staking
//!
//! Epoch-day arithmetic and staking-election bookkeeping shared by the
//! account and contract handlers.

use shared_types::{Entity, EntityId};

const NANOS_PER_DAY: i64 = 86_400 * 1_000_000_000;

/// Days since the Unix epoch of a consensus timestamp.
pub fn epoch_day(consensus_timestamp: i64) -> i64 {
    consensus_timestamp.div_euclid(NANOS_PER_DAY)
}

/// Staking election after alias resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakingElection {
    Account(EntityId),
    Node(i64),
}

/// Record a staking election on `entity`.
///
/// Any election or decline-reward flag starts a new staking period on the
/// consensus day.
pub fn apply_staking(
    entity: &mut Entity,
    election: Option<StakingElection>,
    decline_reward: Option<bool>,
    consensus_timestamp: i64,
) {
    match election {
        Some(StakingElection::Account(account)) => {
            entity.staked_account_id = Some(account);
            entity.staked_node_id = Some(-1);
        }
        Some(StakingElection::Node(node_id)) => {
            entity.staked_account_id = Some(EntityId::EMPTY);
            entity.staked_node_id = Some(node_id);
        }
        None => {}
    }
    if let Some(decline) = decline_reward {
        entity.decline_reward = Some(decline);
    }

    if election.is_some() || decline_reward.is_some() {
        entity.stake_period_start = Some(epoch_day(consensus_timestamp));
    }
}
