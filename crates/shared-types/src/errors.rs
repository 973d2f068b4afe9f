//! # Error Types
//!
//! Defines error types for values crossing the protocol boundary.

use thiserror::Error;

/// An entity id that cannot be represented canonically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEntityId {
    /// A component does not fit the 10/16/38-bit encoding.
    #[error("Entity id {shard}.{realm}.{num} out of range")]
    OutOfRange { shard: i64, realm: i64, num: i64 },

    /// Encoded ids are non-negative.
    #[error("Negative encoded entity id: {0}")]
    NegativeEncoding(i64),

    /// Not of the form `shard.realm.num`.
    #[error("Malformed entity id: {0}")]
    Malformed(String),
}
