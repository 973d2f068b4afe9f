//! # Shared Types Crate
//!
//! Types crossing the boundary of the ingestion core: what the upstream
//! decoder hands in and what the downstream sink receives.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: protocol input types and derived domain rows
//!   are defined once, here.
//! - **Closed Sum Types**: every transaction kind is a variant of
//!   [`TransactionBody`], so dispatch over it is checked at compile time.
//! - **Sparse Rows**: derived rows use `Option` for every field a transaction
//!   may leave untouched.

pub mod entities;
pub mod errors;
pub mod ids;
pub mod network;
pub mod protocol;
pub mod tokens;

pub use entities::*;
pub use errors::*;
pub use ids::*;
pub use network::*;
pub use protocol::*;
pub use tokens::*;
