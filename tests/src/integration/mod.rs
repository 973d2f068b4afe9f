//! Cross-crate integration tests.

pub mod alias_policy;
pub mod allowances;
pub mod determinism;
pub mod flows;
pub mod telemetry;
