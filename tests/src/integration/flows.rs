//! # Integration Test Flows
//!
//! Multi-transaction lifecycles driven through [`RecordItemProcessor`] with
//! the cached resolver and a recording listener, the way a stream reader
//! drives the core.
//!
//! ## Flows Tested:
//!
//! 1. **Account create → alias transfer**: a new alias resolves within the
//!    same stream before anything is persisted
//! 2. **Token create → associate → mint**
//! 3. **Topic create → submit message**
//! 4. **Schedule create → scheduled execution**

#[cfg(test)]
mod tests {
    use mn_01_entity_derivation::{
        Mutation, ParserConfig, ParserError, RecordItemApi, RecordingListener,
    };
    use shared_types::{
        AccountId, EntityId, EntityType, ResponseCode, ScheduleCreateBody, TokenFreezeStatus,
        TransactionBody, TransactionType,
    };

    use crate::fixtures::{
        associate, create_account, create_nft_token, create_topic, item, mint_nfts, processor,
        submit_message, transfer, NODE, PAYER,
    };

    const ALIAS: [u8; 33] = [0x02; 33];

    // =============================================================================
    // ACCOUNTS
    // =============================================================================

    /// An alias created earlier in the stream resolves in a later transfer.
    #[test]
    fn test_created_alias_resolves_in_later_transfer() {
        let (processor, resolver) = processor(ParserConfig::default());
        let mut listener = RecordingListener::new();

        let created = processor
            .process(&create_account(100, 1001, &ALIAS), &mut listener)
            .unwrap();
        assert_eq!(created.entity_ids, vec![EntityId::num(1001), NODE, PAYER]);

        let entities = listener.entities();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].alias.as_deref(), Some(&ALIAS[..]));
        assert_eq!(entities[0].entity_type, Some(EntityType::Account));
        assert_eq!(entities[0].created_timestamp, Some(100));
        assert!(resolver.cached_len() >= 1);

        let transferred = processor
            .process(
                &transfer(200, &[AccountId::alias(ALIAS), AccountId::num(98)], 10),
                &mut listener,
            )
            .unwrap();
        assert_eq!(
            transferred.entity_ids,
            vec![NODE, PAYER, EntityId::num(1001), EntityId::num(98)]
        );

        let transactions = listener.transactions();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].initial_balance, Some(1_000));
        assert!(matches!(listener.mutations().last(), Some(Mutation::Transaction(_))));
    }

    /// Without the create, the same transfer cannot resolve the alias and
    /// the default policy drops it from the referenced ids.
    #[test]
    fn test_unseen_alias_is_skipped_by_default() {
        let (processor, _) = processor(ParserConfig::default());
        let mut listener = RecordingListener::new();

        let processed = processor
            .process(&transfer(200, &[AccountId::alias(ALIAS)], 10), &mut listener)
            .unwrap();
        assert_eq!(processed.entity_ids, vec![NODE, PAYER]);
        assert_eq!(listener.transactions().len(), 1);
    }

    // =============================================================================
    // TOKENS
    // =============================================================================

    #[test]
    fn test_token_create_associate_mint() {
        let token = EntityId::num(1100);
        let (processor, _) = processor(ParserConfig::default());
        let mut listener = RecordingListener::new();

        let stream = vec![
            create_account(100, 1001, &[]),
            create_account(101, 1002, &[]),
            create_nft_token(102, token, 1001),
            associate(103, AccountId::num(1002), &[token]),
            mint_nfts(104, token, &[1, 2, 3], 3),
        ];
        let processed = processor.process_all(&stream, &mut listener).unwrap();
        assert_eq!(processed.len(), 5);
        assert!(processed[2].entity_ids.contains(&EntityId::num(1001)));

        let tokens = listener.tokens();
        assert_eq!(tokens[0].token_id, token);
        assert_eq!(tokens[0].treasury_account_id, Some(EntityId::num(1001)));
        assert_eq!(tokens[0].name.as_deref(), Some("Collectible"));
        assert_eq!(tokens.last().unwrap().total_supply, Some(3));

        let token_accounts = listener.token_accounts();
        assert_eq!(token_accounts.len(), 2);
        assert_eq!(token_accounts[0].account_id, EntityId::num(1001));
        assert_eq!(token_accounts[0].freeze_status, Some(TokenFreezeStatus::NotApplicable));
        assert_eq!(token_accounts[1].account_id, EntityId::num(1002));
        assert_eq!(token_accounts[1].associated, Some(true));
        assert_eq!(token_accounts[1].created_timestamp, Some(103));

        let nfts = listener.nfts();
        let serials: Vec<_> = nfts.iter().map(|nft| nft.serial_number).collect();
        assert_eq!(serials, vec![1, 2, 3]);
        assert!(nfts.iter().all(|nft| nft.token_id == token && nft.deleted == Some(false)));
        assert_eq!(nfts[1].metadata.as_deref(), Some(&b"ipfs://2"[..]));
    }

    /// A mint whose serials and metadata disagree aborts the transaction.
    #[test]
    fn test_inconsistent_mint_is_rejected() {
        let token = EntityId::num(1100);
        let (processor, _) = processor(ParserConfig::default());
        let mut listener = RecordingListener::new();

        let mut mint = mint_nfts(104, token, &[1, 2], 2);
        mint.record.receipt.serial_numbers.push(3);
        let err = processor.process(&mint, &mut listener).unwrap_err();
        assert!(matches!(err, ParserError::InvalidDataset(_)));
        assert!(listener.transactions().is_empty());
    }

    // =============================================================================
    // TOPICS
    // =============================================================================

    #[test]
    fn test_topic_create_then_messages() {
        let topic = EntityId::num(1200);
        let (processor, _) = processor(ParserConfig::default());
        let mut listener = RecordingListener::new();

        let stream = vec![
            create_topic(100, topic),
            submit_message(101, topic, 1, b"first"),
            submit_message(102, topic, 2, b"second"),
        ];
        let processed = processor.process_all(&stream, &mut listener).unwrap();

        assert_eq!(processed[0].entity_ids[0], topic);
        // Messages are indexed by topic message, not by topic.
        assert_eq!(processed[1].entity_ids, vec![NODE, PAYER]);

        let topics = listener.topics();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].id, topic);
        assert_eq!(topics[0].created_timestamp, Some(100));

        let messages = listener.topic_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].message, b"first".to_vec());
        assert_eq!(messages[1].sequence_number, 2);
        assert_eq!(messages[1].running_hash_version, 3);
        assert!(messages.iter().all(|m| m.payer_account_id == PAYER));
    }

    #[test]
    fn test_failed_submit_emits_no_message() {
        let topic = EntityId::num(1200);
        let (processor, _) = processor(ParserConfig::default());
        let mut listener = RecordingListener::new();

        let item = submit_message(101, topic, 1, b"lost").with_status(ResponseCode::InvalidSignature);
        processor.process(&item, &mut listener).unwrap();
        assert!(listener.topic_messages().is_empty());
        assert_eq!(listener.transactions()[0].result, ResponseCode::InvalidSignature);
    }

    // =============================================================================
    // SCHEDULES
    // =============================================================================

    #[test]
    fn test_schedule_create_then_execution() {
        let schedule = EntityId::num(1300);
        let (processor, _) = processor(ParserConfig::default());
        let mut listener = RecordingListener::new();

        let mut create = item(
            100,
            TransactionBody::ScheduleCreate(ScheduleCreateBody {
                scheduled_transaction_body: vec![1, 2, 3],
                memo: "payroll".into(),
                admin_key: None,
                payer: Some(AccountId::num(1001)),
                expiration_time: Some(5_000),
                wait_for_expiry: true,
            }),
        );
        create.record.receipt.schedule_id = Some(schedule);

        let mut executed = transfer(200, &[AccountId::num(98)], 1).with_scheduled(true);
        executed.record.schedule_ref = Some(schedule);

        let processed = processor
            .process_all(&[create, executed], &mut listener)
            .unwrap();
        assert_eq!(processed[1].transaction_type, TransactionType::CryptoTransfer);

        let schedules = listener.schedules();
        assert_eq!(schedules.len(), 2);
        assert_eq!(schedules[0].schedule_id, schedule);
        assert_eq!(schedules[0].creator_account_id, Some(PAYER));
        assert_eq!(schedules[0].payer_account_id, Some(EntityId::num(1001)));
        assert_eq!(schedules[0].wait_for_expiry, Some(true));
        assert_eq!(schedules[1].schedule_id, schedule);
        assert_eq!(schedules[1].executed_timestamp, Some(200));

        let entities = listener.entities();
        assert_eq!(entities[0].id, schedule);
        assert_eq!(entities[0].entity_type, Some(EntityType::Schedule));
        assert_eq!(entities[0].memo.as_deref(), Some("payroll"));

        let transactions = listener.transactions();
        assert!(transactions[1].scheduled);
    }
}
