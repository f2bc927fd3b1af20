//! Classifier credential retrieval with a process-lifetime cache.
//!
//! The backing parameter store is fetched from at most once per process.
//! Trait-based [`ParameterStore`] design allows swapping the secrets
//! backend without touching callers.

pub mod cache;
pub mod error;
pub mod store;

pub use {
    cache::SecretCache,
    error::{Error, Result},
    store::{EnvParameterStore, ParameterStore},
};
