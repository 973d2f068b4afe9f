//! # Custom Fees
//!
//! Conversion of a token's declared fee schedule into a [`CustomFee`] row,
//! shared by token create and fee schedule update.

use shared_types::{
    CustomFee, CustomFeeKind, CustomFeeSpec, EntityId, FixedFee, FixedFeeSpec, Fraction,
    FractionalFee, RoyaltyFee,
};

use super::HandlerContext;
use crate::domain::{ParserError, Result};
use crate::recoverable_error;

/// Converted fee schedule plus the collectors a new token auto-associates.
#[derive(Debug, Default)]
pub struct FeeSchedule {
    pub custom_fee: CustomFee,
    pub auto_associated: Vec<EntityId>,
}

/// Convert `specs` for `token_id`.
///
/// With `is_token_create`, collectors of fractional fees and of fixed fees
/// denominated in the new token are returned as auto-associated accounts.
pub fn build_fee_schedule(
    ctx: &mut HandlerContext<'_>,
    token_id: EntityId,
    specs: &[CustomFeeSpec],
    is_token_create: bool,
) -> Result<FeeSchedule> {
    let mut schedule = FeeSchedule {
        custom_fee: CustomFee {
            entity_id: token_id,
            timestamp_lower: ctx.consensus_timestamp(),
            ..Default::default()
        },
        auto_associated: Vec::new(),
    };

    for spec in specs {
        if let CustomFeeKind::Unknown(case) = spec.fee {
            return Err(ParserError::InvalidCustomFee { token_id, case });
        }
        let Some(collector) = ctx.lookup_account_or_log(&spec.fee_collector, "fee_collector")? else {
            continue;
        };

        match &spec.fee {
            CustomFeeKind::Fixed(fixed) => {
                let fee = fixed_fee(fixed, token_id, collector, spec.all_collectors_are_exempt);
                if is_token_create && fee.denominating_token_id == Some(token_id) {
                    schedule.auto_associated.push(collector);
                }
                schedule.custom_fee.fixed_fees.push(fee);
            }
            CustomFeeKind::Fractional(fractional) => {
                if !valid_fraction(fractional.fraction, token_id, ctx) {
                    continue;
                }
                schedule.custom_fee.fractional_fees.push(FractionalFee {
                    numerator: fractional.fraction.numerator,
                    denominator: fractional.fraction.denominator,
                    minimum_amount: fractional.minimum_amount,
                    maximum_amount: fractional.maximum_amount,
                    net_of_transfers: fractional.net_of_transfers,
                    collector_account_id: collector,
                    all_collectors_are_exempt: spec.all_collectors_are_exempt,
                });
                if is_token_create {
                    schedule.auto_associated.push(collector);
                }
            }
            CustomFeeKind::Royalty(royalty) => {
                if !valid_fraction(royalty.exchange_value_fraction, token_id, ctx) {
                    continue;
                }
                let fallback_fee = royalty
                    .fallback_fee
                    .as_ref()
                    .map(|fallback| fixed_fee(fallback, token_id, collector, spec.all_collectors_are_exempt));
                if is_token_create
                    && fallback_fee
                        .as_ref()
                        .is_some_and(|fee| fee.denominating_token_id == Some(token_id))
                {
                    schedule.auto_associated.push(collector);
                }
                schedule.custom_fee.royalty_fees.push(RoyaltyFee {
                    numerator: royalty.exchange_value_fraction.numerator,
                    denominator: royalty.exchange_value_fraction.denominator,
                    fallback_fee,
                    collector_account_id: collector,
                    all_collectors_are_exempt: spec.all_collectors_are_exempt,
                });
            }
            CustomFeeKind::Unknown(_) => continue,
        }
        ctx.add_entity_id(collector);
    }

    Ok(schedule)
}

/// An explicitly empty denominating token denotes the token itself.
fn fixed_fee(spec: &FixedFeeSpec, token_id: EntityId, collector: EntityId, exempt: bool) -> FixedFee {
    let denominating_token_id = spec
        .denominating_token_id
        .map(|id| if id.is_empty() { token_id } else { id });
    FixedFee {
        amount: spec.amount,
        collector_account_id: collector,
        denominating_token_id,
        all_collectors_are_exempt: exempt,
    }
}

fn valid_fraction(fraction: Fraction, token_id: EntityId, ctx: &HandlerContext<'_>) -> bool {
    if fraction.denominator == 0 {
        recoverable_error!(
            consensus_timestamp = ctx.consensus_timestamp(),
            token_id = %token_id,
            "Custom fee with zero denominator"
        );
        return false;
    }
    true
}
