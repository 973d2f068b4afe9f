//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports:
//!
//! - [`RecordingListener`]: in-memory sink, the test assertion surface.
//! - [`ChannelListener`]: forwards mutations to an async sink task.
//! - [`CachedEntityIdService`]: LRU-cached resolver over an [`AliasStore`].
//!
//! [`AliasStore`]: crate::ports::AliasStore

pub mod channel;
pub mod recording;
pub mod resolver;

pub use channel::ChannelListener;
pub use recording::RecordingListener;
pub use resolver::{CachedEntityIdService, InMemoryAliasStore, DEFAULT_CACHE_CAPACITY};
