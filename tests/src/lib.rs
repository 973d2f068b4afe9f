//! # Mirror Ingest Test Suite
//!
//! Unified test crate exercising the ingestion core through its public API
//! only: the processor, the cached resolver and the recording listener.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Record item builders and a sample stream
//! └── integration/
//!     ├── flows.rs      # Multi-transaction lifecycles
//!     ├── alias_policy.rs
//!     ├── allowances.rs # Last-wins reconciliation properties
//!     ├── determinism.rs
//!     └── telemetry.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p mn-tests
//!
//! # By category
//! cargo test -p mn-tests integration::flows::
//!
//! # Benchmarks
//! cargo bench -p mn-tests
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
