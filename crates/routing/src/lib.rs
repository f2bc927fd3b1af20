//! Route inbound messages to agents and record the exchange.
//!
//! Routing path per request:
//! 1. Classify the message against the session
//! 2. Resolve the decision to a registered agent (or fail / fall back)
//! 3. Load bounded prior history for (history key, agent)
//! 4. Invoke the agent capability
//! 5. Persist the user+agent pair when the agent allows it
//! 6. Return the reply and the selected agent id

pub mod error;
pub mod handle;
pub mod orchestrator;

pub use {
    error::{Error, Result},
    handle::{ProviderFactory, RouterDeps, RouterHandle},
    orchestrator::Orchestrator,
};
