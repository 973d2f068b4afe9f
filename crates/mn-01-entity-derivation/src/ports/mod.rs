//! # Ports Layer
//!
//! Hexagonal boundary of the derivation pipeline.

pub mod inbound;
pub mod outbound;

pub use inbound::{ProcessedTransaction, RecordItemApi};
pub use outbound::{AliasStore, EntityIdService, EntityListener, Mutation};
