//! # Error Types
//!
//! Error taxonomy of the entity derivation pipeline.
//!
//! | Class | Type | Handling |
//! |-------|------|----------|
//! | Data quality | logged with [`RECOVERABLE_ERROR`] | sub-step skipped |
//! | Alias not found | [`ResolutionError::NotFound`] | decided by `PartialDataAction` |
//! | Invariant violation | [`ParserError`] | transaction aborted |

use shared_types::{EntityId, InvalidEntityId, TransactionType};
use thiserror::Error;

/// Log marker for data-quality problems that do not halt ingestion.
pub const RECOVERABLE_ERROR: &str = "Recoverable error.";

/// Log a data-quality problem with the [`RECOVERABLE_ERROR`] marker.
///
/// Accepts the same field and message syntax as `tracing::error!`.
#[macro_export]
macro_rules! recoverable_error {
    ($($arg:tt)+) => {
        ::tracing::error!(marker = $crate::domain::RECOVERABLE_ERROR, $($arg)+)
    };
}

/// Failure reported by an [`crate::ports::EntityIdService`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// The alias or EVM address is unknown to the resolver.
    #[error("No entity found for {kind} {value}")]
    NotFound { kind: &'static str, value: String },

    /// A numeric id that cannot be encoded.
    #[error("Invalid entity id: {0}")]
    Invalid(#[from] InvalidEntityId),

    /// The backing store failed.
    #[error("Alias store failure: {0}")]
    Backend(String),
}

impl ResolutionError {
    pub fn not_found(kind: &'static str, value: &[u8]) -> Self {
        Self::NotFound {
            kind,
            value: hex::encode(value),
        }
    }
}

/// Failure reported by an [`crate::ports::EntityListener`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListenerError {
    #[error("Sink closed")]
    Closed,

    #[error("Sink rejected mutation: {0}")]
    Rejected(String),
}

/// Fatal errors that abort processing of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    /// Alias resolution failed under `PartialDataAction::Throw`.
    #[error("Unable to resolve {kind} {value}")]
    AliasNotFound { kind: &'static str, value: String },

    /// The resolver itself failed; never downgraded to a skip.
    #[error("Entity id resolution failed: {0}")]
    Resolution(ResolutionError),

    /// A handler received a body of another transaction kind.
    #[error("Handler for {expected} received {actual} body")]
    BodyMismatch {
        expected: TransactionType,
        actual: TransactionType,
    },

    /// A custom fee of a kind this build does not understand.
    #[error("Invalid custom fee case {case} for token {token_id}")]
    InvalidCustomFee { token_id: EntityId, case: i32 },

    #[error("Invalid entity id: {0}")]
    InvalidEntityId(#[from] InvalidEntityId),

    /// The record contradicts itself.
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Listener error: {0}")]
    Listener(#[from] ListenerError),
}

impl From<ResolutionError> for ParserError {
    fn from(error: ResolutionError) -> Self {
        match error {
            ResolutionError::NotFound { kind, value } => Self::AliasNotFound { kind, value },
            ResolutionError::Invalid(invalid) => Self::InvalidEntityId(invalid),
            backend @ ResolutionError::Backend(_) => Self::Resolution(backend),
        }
    }
}

/// Result type for the derivation pipeline.
pub type Result<T> = std::result::Result<T, ParserError>;
