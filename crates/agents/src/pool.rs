use std::sync::Arc;

use tracing::debug;

use triage_common::types::{ChatEntry, Role};

use crate::{
    Result,
    escalation::EscalationAgent,
    provider::{CompletionProvider, ProviderMessage},
};

/// Reserved id of the escalation path.
pub const ESCALATION_AGENT_ID: &str = "human-escalation";

// ── The registered agent set ────────────────────────────────────────────────

/// Closed set of registered agents. Fixed at orchestrator construction;
/// the classifier returns one of these tags, never a live object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    OrderManagement,
    ProductInfo,
    HumanEscalation,
}

impl AgentKind {
    /// All registered variants, in classifier decision-space order.
    pub const ALL: [AgentKind; 3] = [
        AgentKind::OrderManagement,
        AgentKind::ProductInfo,
        AgentKind::HumanEscalation,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            AgentKind::OrderManagement => "order-management",
            AgentKind::ProductInfo => "product-info",
            AgentKind::HumanEscalation => ESCALATION_AGENT_ID,
        }
    }

    #[must_use]
    pub fn descriptor(self) -> AgentDescriptor {
        match self {
            AgentKind::OrderManagement => AgentDescriptor {
                kind: self,
                id: self.id(),
                display_name: "Order Management",
                description: "Order status, shipping, tracking, returns, and refunds \
                              for existing orders.",
            },
            AgentKind::ProductInfo => AgentDescriptor {
                kind: self,
                id: self.id(),
                display_name: "Product Info",
                description: "Product capabilities, availability, pricing, and \
                              compatibility questions.",
            },
            AgentKind::HumanEscalation => AgentDescriptor {
                kind: self,
                id: self.id(),
                display_name: "Human Escalation",
                description: "Requests that need a human: complaints, account \
                              closures, anything explicitly asking for a person.",
            },
        }
    }
}

/// Registry entry describing one agent to the classifier and to operators.
#[derive(Debug, Clone)]
pub struct AgentDescriptor {
    pub kind: AgentKind,
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
}

/// What an agent capability returns to the orchestrator.
#[derive(Debug, Clone)]
pub struct AgentReply {
    pub output: String,
    /// `false` suppresses history persistence for this exchange.
    pub should_persist: bool,
}

// ── Pool ────────────────────────────────────────────────────────────────────

/// Registry of all registered agents, immutable after construction.
///
/// `handle` is the single dispatch funnel; a verification wrapper that
/// validates a domain agent's output and re-routes to escalation would
/// hook in here.
pub struct AgentPool {
    provider: Arc<dyn CompletionProvider>,
    escalation: EscalationAgent,
}

impl AgentPool {
    #[must_use]
    pub fn new(provider: Arc<dyn CompletionProvider>, escalation: EscalationAgent) -> Self {
        Self {
            provider,
            escalation,
        }
    }

    /// The classifier's decision space.
    #[must_use]
    pub fn descriptors(&self) -> Vec<AgentDescriptor> {
        AgentKind::ALL.iter().map(|kind| kind.descriptor()).collect()
    }

    /// Map an agent id back to its variant.
    #[must_use]
    pub fn resolve(&self, id: &str) -> Option<AgentKind> {
        AgentKind::ALL.iter().copied().find(|kind| kind.id() == id)
    }

    /// Invoke the capability of `kind` with the message and prior history.
    pub async fn handle(
        &self,
        kind: AgentKind,
        message: &str,
        session_id: &str,
        history: &[ChatEntry],
    ) -> Result<AgentReply> {
        match kind {
            AgentKind::HumanEscalation => self.escalation.handle(message, session_id).await,
            domain => self.handle_domain(domain, message, history).await,
        }
    }

    async fn handle_domain(
        &self,
        kind: AgentKind,
        message: &str,
        history: &[ChatEntry],
    ) -> Result<AgentReply> {
        let descriptor = kind.descriptor();
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ProviderMessage::system(domain_system_prompt(&descriptor)));
        for entry in history {
            messages.push(match entry.role {
                Role::User => ProviderMessage::user(entry.text.clone()),
                Role::Agent => ProviderMessage::assistant(entry.text.clone()),
            });
        }
        messages.push(ProviderMessage::user(message));

        debug!(agent = descriptor.id, prior = history.len(), "invoking domain agent");
        let output = self.provider.complete(&messages).await?;
        Ok(AgentReply {
            output,
            should_persist: true,
        })
    }
}

fn domain_system_prompt(descriptor: &AgentDescriptor) -> String {
    format!(
        "You are the {name} agent for a customer-support desk. Scope: {scope} \
         Answer the customer's latest message using the conversation so far. \
         Be concise and concrete; if the request is outside your scope, say so.",
        name = descriptor.display_name,
        scope = descriptor.description,
    )
}
