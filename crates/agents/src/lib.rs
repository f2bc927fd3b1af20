//! Agent runtime: the registered agent set, capability dispatch, the
//! escalation path, and the message classifier.
//!
//! The agent set is closed (a tagged variant per registered agent)
//! because it is fixed at orchestrator construction. The classifier's
//! decision space is exactly this set plus "none".

pub mod classifier;
pub mod error;
pub mod escalation;
pub mod pool;
pub mod provider;

pub use {
    classifier::{Classifier, ClassifierDecision, LlmClassifier},
    error::{Error, Result},
    escalation::{ESCALATION_ACK, EscalationAgent},
    pool::{AgentDescriptor, AgentKind, AgentPool, AgentReply},
    provider::{CompletionProvider, ProviderMessage, ProviderRole},
};
