//! Wire and domain types shared across the routing pipeline.

use {
    chrono::Utc,
    serde::{Deserialize, Serialize},
};

// ── Inbound / outbound wire shapes ──────────────────────────────────────────

/// One inbound queue record, parsed from the raw JSON payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundRecord {
    pub session_id: String,
    pub message: String,
}

/// Customer-facing reply published to the delivery queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Always `"customer"` for replies produced by the routing path.
    pub destination: String,
    pub message: String,
}

impl OutboundMessage {
    #[must_use]
    pub fn customer(message: impl Into<String>) -> Self {
        Self {
            destination: "customer".into(),
            message: message.into(),
        }
    }
}

/// Human-handoff notification published to the escalation queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationNotice {
    pub session_id: String,
    pub message: String,
}

// ── Conversation history ────────────────────────────────────────────────────

/// Who authored a chat entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

/// One persisted line of a (session, agent) conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub role: Role,
    pub text: String,
    /// Epoch milliseconds at append time.
    pub timestamp_ms: i64,
}

impl ChatEntry {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::stamped(Role::User, text)
    }

    #[must_use]
    pub fn agent(text: impl Into<String>) -> Self {
        Self::stamped(Role::Agent, text)
    }

    fn stamped(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp_ms: Utc::now().timestamp_millis(),
        }
    }
}

// ── Routing results ─────────────────────────────────────────────────────────

/// Outcome of one routed request, returned to the consumer loop and
/// forwarded downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingResult {
    pub output: String,
    /// A registered agent id, or the reserved escalation id.
    pub selected_agent: String,
    pub success: bool,
}
