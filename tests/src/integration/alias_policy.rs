//! # Partial Data Policy
//!
//! Behavior of unresolvable aliases and EVM addresses under
//! `PartialDataAction::Skip` and `PartialDataAction::Throw`, against the
//! cached resolver and a custom failing store.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mn_01_entity_derivation::{
        AliasStore, CachedEntityIdService, ParserConfig, ParserError, PartialDataAction,
        RecordItemApi, RecordItemProcessor, RecordingListener, ResolutionError,
    };
    use shared_types::{AccountId, CryptoDeleteBody, EntityId, TransactionBody};

    use crate::fixtures::{item, processor, transfer, NODE, PAYER};

    const ALIAS: [u8; 33] = [0x03; 33];

    struct UnavailableStore;

    impl AliasStore for UnavailableStore {
        fn find_by_alias(&self, _: i64, _: i64, _: &[u8]) -> Result<Option<EntityId>, ResolutionError> {
            Err(ResolutionError::Backend("pool exhausted".into()))
        }

        fn find_by_evm_address(
            &self,
            _: i64,
            _: i64,
            _: &[u8],
        ) -> Result<Option<EntityId>, ResolutionError> {
            Err(ResolutionError::Backend("pool exhausted".into()))
        }
    }

    fn delete_by_alias(consensus_timestamp: i64) -> shared_types::RecordItem {
        item(
            consensus_timestamp,
            TransactionBody::CryptoDelete(CryptoDeleteBody {
                delete_account: AccountId::alias(ALIAS),
                transfer_account: Some(AccountId::num(98)),
            }),
        )
    }

    // =============================================================================
    // SKIP
    // =============================================================================

    #[test]
    fn test_skip_treats_unknown_alias_as_absent() {
        let (processor, _) = processor(ParserConfig::default());
        let mut listener = RecordingListener::new();

        let processed = processor.process(&delete_by_alias(10), &mut listener).unwrap();
        assert!(listener.entities().is_empty());
        assert_eq!(listener.transactions().len(), 1);
        assert_eq!(listener.transactions()[0].entity_id, None);
        assert!(processed.entity_ids.starts_with(&[NODE, PAYER]));
        assert!(!processed.entity_ids.contains(&EntityId::EMPTY));
    }

    #[test]
    fn test_alias_known_to_store_resolves() {
        let (processor, resolver) = processor(ParserConfig::default());
        resolver.store().insert_alias(&ALIAS, EntityId::num(1500));
        let mut listener = RecordingListener::new();

        let processed = processor.process(&delete_by_alias(10), &mut listener).unwrap();
        assert_eq!(processed.entity_ids[0], EntityId::num(1500));

        let entities = listener.entities();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].id, EntityId::num(1500));
        assert_eq!(entities[0].deleted, Some(true));
        assert_eq!(listener.transactions()[0].entity_id, Some(EntityId::num(1500)));
    }

    // =============================================================================
    // THROW
    // =============================================================================

    #[test]
    fn test_throw_aborts_without_mutations() {
        let config = ParserConfig::default().with_partial_data_action(PartialDataAction::Throw);
        let (processor, _) = processor(config);
        let mut listener = RecordingListener::new();

        let err = processor.process(&delete_by_alias(10), &mut listener).unwrap_err();
        assert!(matches!(err, ParserError::AliasNotFound { kind: "alias", .. }));
        assert!(listener.is_empty());
    }

    /// Secondary references such as transfer legs stay recoverable even
    /// under `Throw`.
    #[test]
    fn test_throw_keeps_transfer_legs_recoverable() {
        let config = ParserConfig::default().with_partial_data_action(PartialDataAction::Throw);
        let (processor, _) = processor(config);
        let mut listener = RecordingListener::new();

        let processed = processor
            .process(&transfer(10, &[AccountId::alias(ALIAS)], 5), &mut listener)
            .unwrap();
        assert_eq!(processed.entity_ids, vec![NODE, PAYER]);
    }

    // =============================================================================
    // BACKEND FAILURES
    // =============================================================================

    #[test]
    fn test_store_failure_is_fatal_under_both_policies() {
        for action in [PartialDataAction::Skip, PartialDataAction::Throw] {
            let processor = RecordItemProcessor::new(
                ParserConfig::default().with_partial_data_action(action),
                Arc::new(CachedEntityIdService::new(UnavailableStore)),
            );
            let mut listener = RecordingListener::new();

            let err = processor
                .process(&transfer(10, &[AccountId::alias(ALIAS)], 5), &mut listener)
                .unwrap_err();
            assert_eq!(
                err,
                ParserError::Resolution(ResolutionError::Backend("pool exhausted".into()))
            );
            assert!(listener.is_empty());
        }
    }
}
