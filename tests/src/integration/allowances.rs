//! # Allowance Reconciliation
//!
//! Within one approval, only the last-declared grant per owner and spender
//! pair survives, whatever the batch looks like.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use mn_01_entity_derivation::{ParserConfig, RecordItemApi, RecordingListener};
    use proptest::prelude::*;
    use shared_types::EntityId;

    use crate::fixtures::{approve_allowances, processor, PAYER};

    fn emitted(grants: &[(i64, i64, i64)]) -> Vec<(EntityId, EntityId, i64)> {
        let (processor, _) = processor(ParserConfig::default());
        let mut listener = RecordingListener::new();
        processor
            .process(&approve_allowances(50, grants), &mut listener)
            .unwrap();
        listener
            .crypto_allowances()
            .iter()
            .map(|allowance| (allowance.owner, allowance.spender, allowance.amount))
            .collect()
    }

    /// Owner 1001 approves spender 1002 for 5 then 10; owner 1001 approves
    /// spender 1003 for 7; owner 1001 approves spender 1002 for 5 again.
    #[test]
    fn test_last_declared_grant_wins() {
        let rows = emitted(&[(1001, 1002, 5), (1001, 1002, 10), (1001, 1003, 7), (1001, 1002, 5)]);
        assert_eq!(
            rows,
            vec![
                (EntityId::num(1001), EntityId::num(1002), 5),
                (EntityId::num(1001), EntityId::num(1003), 7),
            ]
        );
    }

    #[test]
    fn test_rows_carry_payer_and_timestamp() {
        let (processor, _) = processor(ParserConfig::default());
        let mut listener = RecordingListener::new();
        let processed = processor
            .process(&approve_allowances(50, &[(1001, 1002, 9)]), &mut listener)
            .unwrap();

        let allowances = listener.crypto_allowances();
        assert_eq!(allowances[0].amount_granted, 9);
        assert_eq!(allowances[0].payer_account_id, PAYER);
        assert_eq!(allowances[0].timestamp_lower, 50);
        assert!(processed.entity_ids.contains(&EntityId::num(1001)));
        assert!(processed.entity_ids.contains(&EntityId::num(1002)));
    }

    proptest! {
        #[test]
        fn prop_one_row_per_pair_with_last_amount(
            grants in prop::collection::vec((1001i64..1004, 2001i64..2004, 0i64..1_000), 0..24)
        ) {
            let mut last = HashMap::new();
            for &(owner, spender, amount) in &grants {
                last.insert((EntityId::num(owner), EntityId::num(spender)), amount);
            }

            let rows = emitted(&grants);
            prop_assert_eq!(rows.len(), last.len());
            for (owner, spender, amount) in rows {
                prop_assert_eq!(last.get(&(owner, spender)), Some(&amount));
            }
        }

        #[test]
        fn prop_emission_follows_reverse_declaration(
            grants in prop::collection::vec((1001i64..1004, 2001i64..2004, 0i64..1_000), 1..24)
        ) {
            let rows = emitted(&grants);
            let (owner, spender, amount) = grants[grants.len() - 1];
            prop_assert_eq!(rows[0], (EntityId::num(owner), EntityId::num(spender), amount));
        }
    }
}
