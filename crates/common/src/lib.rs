//! Shared types, error definitions, and utilities used across all triage crates.

pub mod error;
pub mod queue;
pub mod types;

pub use error::{Error, Result};
