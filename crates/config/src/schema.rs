//! Config schema types (queues, history store, routing policy, logging).

use serde::{Deserialize, Serialize};

/// Root configuration for the routing engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Delivery queue identifier for customer-facing replies. Required.
    pub delivery_queue: String,
    /// Escalation queue identifier for human-handoff notices.
    /// Defaults to `<delivery_queue>-escalation` when not set.
    pub escalation_queue: String,
    /// Parameter name under which the classifier credential is stored.
    pub credential_name: String,
    pub history: HistoryConfig,
    pub policy: RoutingPolicy,
    pub logging: LoggingToggles,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            delivery_queue: String::new(),
            escalation_queue: String::new(),
            credential_name: "triage/classifier-api-key".into(),
            history: HistoryConfig::default(),
            policy: RoutingPolicy::default(),
            logging: LoggingToggles::default(),
        }
    }
}

/// Chat history store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Table/store identifier for a managed backend. Unused by the
    /// in-memory store.
    pub table: Option<String>,
    /// Region of the managed backend, when applicable.
    pub region: Option<String>,
    /// Attribute name the backend uses for time-to-live eviction.
    pub ttl_attribute: Option<String>,
    /// Time-to-live in seconds, paired with `ttl_attribute`.
    pub ttl_secs: Option<u64>,
    /// Retained user+agent pairs per (session, agent). Oldest pairs are
    /// evicted on write.
    pub window_pairs: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            table: None,
            region: None,
            ttl_attribute: None,
            ttl_secs: None,
            window_pairs: 10,
        }
    }
}

/// Agent-selection policy knobs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingPolicy {
    /// When the classifier identifies no agent: `true` falls back to
    /// `default_agent`, `false` surfaces the failure to the caller.
    pub use_default_agent_if_none: bool,
    /// Agent id used when the fallback is enabled.
    pub default_agent: Option<String>,
}

/// Per-category execution-logger toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingToggles {
    /// Record classifier decisions (raw output + chosen agent).
    pub classifier_decisions: bool,
    /// Record agent invocations and timings.
    pub agent_invocations: bool,
}

impl Default for LoggingToggles {
    fn default() -> Self {
        Self {
            classifier_decisions: true,
            agent_invocations: true,
        }
    }
}
