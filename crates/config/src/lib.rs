//! Environment-driven configuration for the routing engine.
//!
//! The host passes configuration through environment variables; they are
//! read once at startup into a typed [`RouterConfig`]. A missing required
//! variable is a fatal startup error, never a silent default.

pub mod error;
pub mod loader;
pub mod schema;

pub use {
    error::{Error, Result},
    loader::{from_env, from_lookup},
    schema::{HistoryConfig, LoggingToggles, RouterConfig, RoutingPolicy},
};
