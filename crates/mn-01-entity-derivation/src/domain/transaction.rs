//! # Transaction Row
//!
//! Summary row built for every processed record item, failed or not.

use shared_types::{EntityId, RecordItem, Transaction};

/// Build the transaction row of `item` with its resolved main entity.
pub fn build_transaction(item: &RecordItem, entity_id: EntityId) -> Transaction {
    Transaction {
        consensus_timestamp: item.consensus_timestamp,
        transaction_type: item.transaction_type(),
        result: item.record.receipt.status,
        payer_account_id: item.payer_account_id,
        node_account_id: (!item.node_account_id.is_empty()).then_some(item.node_account_id),
        entity_id: (!entity_id.is_empty()).then_some(entity_id),
        charged_tx_fee: item.record.transaction_fee,
        initial_balance: None,
        max_fee: item.max_fee,
        memo: item.memo.clone(),
        valid_start_ns: item.valid_start_ns,
        valid_duration_seconds: item.valid_duration_seconds,
        nonce: item.nonce,
        parent_consensus_timestamp: item.parent_consensus_timestamp(),
        scheduled: item.scheduled,
        transaction_hash: item.record.transaction_hash.clone(),
        index: item.transaction_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{ResponseCode, TransactionBody, TransactionType, UtilPrngBody};

    #[test]
    fn test_row_fields() {
        let mut item = RecordItem::new(500, TransactionBody::UtilPrng(UtilPrngBody { range: 0 }))
            .with_payer(EntityId::num(2))
            .with_node(EntityId::num(3))
            .with_status(ResponseCode::InsufficientGas);
        item.memo = "memo".into();
        item.record.transaction_fee = 77;

        let row = build_transaction(&item, EntityId::EMPTY);
        assert_eq!(row.transaction_type, TransactionType::UtilPrng);
        assert_eq!(row.result, ResponseCode::InsufficientGas);
        assert_eq!(row.payer_account_id, EntityId::num(2));
        assert_eq!(row.node_account_id, Some(EntityId::num(3)));
        assert_eq!(row.entity_id, None);
        assert_eq!(row.charged_tx_fee, 77);
        assert_eq!(row.memo, "memo");
        assert_eq!(row.valid_start_ns, 500);
    }

    #[test]
    fn test_child_row_links_parent() {
        let parent = RecordItem::new(100, TransactionBody::UtilPrng(UtilPrngBody { range: 0 }));
        let child = RecordItem::new(101, TransactionBody::UtilPrng(UtilPrngBody { range: 0 }))
            .with_parent(parent);
        let row = build_transaction(&child, EntityId::num(9));
        assert_eq!(row.parent_consensus_timestamp, Some(100));
        assert_eq!(row.entity_id, Some(EntityId::num(9)));
    }
}
