//! # Determinism
//!
//! The same stream always yields the same mutation stream and the same
//! referenced ids, independent of resolver cache state.

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;
    use std::sync::Arc;

    use mn_01_entity_derivation::{
        CachedEntityIdService, ChannelListener, InMemoryAliasStore, Mutation, ParserConfig,
        RecordItemProcessor, RecordingListener,
    };
    use proptest::prelude::*;

    use crate::fixtures::{processor, sample_stream};

    fn replay(rounds: i64) -> (String, Vec<Vec<shared_types::EntityId>>) {
        let (processor, _) = processor(ParserConfig::default());
        let mut listener = RecordingListener::new();
        let processed = processor
            .process_all(&sample_stream(rounds), &mut listener)
            .unwrap();
        (
            listener.to_json().unwrap(),
            processed.into_iter().map(|p| p.entity_ids).collect(),
        )
    }

    #[test]
    fn test_replay_is_byte_identical() {
        let (first_json, first_ids) = replay(4);
        let (second_json, second_ids) = replay(4);
        assert_eq!(first_json, second_json);
        assert_eq!(first_ids, second_ids);
    }

    /// A cache holding just one account's alias and derived address gives
    /// the same output as a roomy one.
    #[test]
    fn test_cache_capacity_does_not_change_output() {
        let items = sample_stream(3);

        let mut outputs = Vec::new();
        for capacity in [2usize, 1_000] {
            let resolver = CachedEntityIdService::with_capacity(
                InMemoryAliasStore::new(),
                NonZeroUsize::new(capacity).unwrap(),
            );
            let processor = RecordItemProcessor::new(ParserConfig::default(), Arc::new(resolver));
            let mut listener = RecordingListener::new();
            processor.process_all(&items, &mut listener).unwrap();
            outputs.push(listener.to_json().unwrap());
        }
        assert_eq!(outputs[0], outputs[1]);
    }

    #[test]
    fn test_recorded_stream_survives_json() {
        let (json, _) = replay(2);
        let restored: Vec<Mutation> = serde_json::from_str(&json).unwrap();
        let (processor, _) = processor(ParserConfig::default());
        let mut listener = RecordingListener::new();
        processor.process_all(&sample_stream(2), &mut listener).unwrap();
        assert_eq!(listener.mutations(), restored.as_slice());
    }

    /// A channel-backed sink sees exactly what a recording sink sees.
    #[tokio::test]
    async fn test_channel_sink_matches_recording() {
        let items = sample_stream(2);
        let (processor, _) = processor(ParserConfig::default());
        let mut recording = RecordingListener::new();
        processor.process_all(&items, &mut recording).unwrap();

        let (processor, _) = crate::fixtures::processor(ParserConfig::default());
        let (mut channel, mut receiver) = ChannelListener::channel();
        let sink = tokio::spawn(async move {
            let mut received = Vec::new();
            while let Some(mutation) = receiver.recv().await {
                received.push(mutation);
            }
            received
        });
        processor.process_all(&items, &mut channel).unwrap();
        drop(channel);

        let received = sink.await.unwrap();
        assert_eq!(received.as_slice(), recording.mutations());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_every_round_ends_with_its_transaction(rounds in 1i64..4) {
            let (processor, _) = processor(ParserConfig::default());
            let mut listener = RecordingListener::new();
            let items = sample_stream(rounds);
            let processed = processor.process_all(&items, &mut listener).unwrap();

            prop_assert_eq!(processed.len(), items.len());
            prop_assert_eq!(listener.transactions().len(), items.len());
            prop_assert!(matches!(listener.mutations().last(), Some(Mutation::Transaction(_))));
            for ids in processed.iter().map(|p| &p.entity_ids) {
                let mut unique = ids.clone();
                unique.sort();
                unique.dedup();
                prop_assert_eq!(unique.len(), ids.len());
                prop_assert!(!ids.contains(&shared_types::EntityId::EMPTY));
            }
        }
    }
}
