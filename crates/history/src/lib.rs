//! Per-(session, agent) chat history, bounded to a configured window.
//!
//! History is append-only from the caller's point of view; the store
//! evicts the oldest user+agent pairs on write so no key ever holds more
//! than the configured number of pairs.

pub mod error;
pub mod key;
pub mod store;

pub use {
    error::{Error, Result},
    key::composite_key,
    store::{HistoryStore, MemoryHistoryStore},
};
