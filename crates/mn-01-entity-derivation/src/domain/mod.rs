//! # Domain Layer
//!
//! Pure derivation logic with no I/O: lifecycle, allowance reconciliation,
//! freeze windows, staking, EVM address derivation and the error taxonomy.

pub mod allowances;
pub mod errors;
pub mod evm;
pub mod freeze;
pub mod lifecycle;
pub mod staking;
pub mod transaction;

pub use allowances::reconcile_last_wins;
pub use errors::{ListenerError, ParserError, ResolutionError, Result, RECOVERABLE_ERROR};
pub use evm::alias_to_evm_address;
pub use freeze::{freeze_window, FreezeWindow};
pub use lifecycle::{build_entity, EntityOperation};
pub use staking::{apply_staking, epoch_day, StakingElection};
pub use transaction::build_transaction;
