//! # Entity Derivation (mn-01)
//!
//! Record-ingestion core of the mirror node. Consumes decoded consensus
//! transaction records strictly in consensus order and derives the
//! relational entity state the ledger itself does not expose: accounts,
//! contracts, tokens, topics, allowances, schedules, nodes and staking data.
//!
//! ## Pipeline
//!
//! ```text
//! RecordItem ──→ registry::select(type) ──→ TransactionHandler
//!                                               │
//!        entity_id ──→ update_transaction ──→ build_entity ──→ update_entity
//!                                               │
//!                                               ↓
//!                              EntityListener (ordered mutations)
//! ```
//!
//! Each call to [`RecordItemProcessor::process`] emits every derived
//! mutation of one transaction, the [`shared_types::Transaction`] row last,
//! and returns the ordered, de-duplicated entity ids the transaction
//! referenced.
//!
//! ## Hexagonal Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adapters/  RecordingListener, ChannelListener,                 │
//! │             CachedEntityIdService (LRU over AliasStore)         │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - RecordItemApi                              │
//! │  ports/outbound.rs - EntityIdService, AliasStore, EntityListener│
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  handlers/  one TransactionHandler per transaction kind         │
//! │  domain/    lifecycle, allowances, freeze, staking, evm, errors │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Partial Data
//!
//! Historical streams may reference aliases the resolver cannot map.
//! [`PartialDataAction::Skip`] treats such ids as absent and logs them;
//! [`PartialDataAction::Throw`] aborts the transaction with
//! [`ParserError::AliasNotFound`]. Resolver backend failures are always
//! fatal.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod handlers;
pub mod ports;
pub mod processor;
pub mod registry;

pub use adapters::{CachedEntityIdService, ChannelListener, InMemoryAliasStore, RecordingListener};
pub use config::{ParserConfig, PartialDataAction, PersistProperties};
pub use domain::{EntityOperation, ListenerError, ParserError, ResolutionError, Result, RECOVERABLE_ERROR};
pub use handlers::{HandlerContext, TransactionHandler};
pub use ports::{AliasStore, EntityIdService, EntityListener, Mutation, ProcessedTransaction, RecordItemApi};
pub use processor::RecordItemProcessor;
