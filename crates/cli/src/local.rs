//! Deterministic stand-in provider for local runs.
//!
//! Real deployments wire a language-model client through the provider
//! factory; this keyword matcher keeps the binary runnable without one.

use async_trait::async_trait;

use triage_agents::{CompletionProvider, ProviderMessage, ProviderRole};

pub struct KeywordProvider;

impl KeywordProvider {
    fn classify(message: &str) -> &'static str {
        let lower = message.to_lowercase();
        let order = ["order", "ship", "track", "refund", "return", "delivery"];
        let product = ["product", "price", "stock", "available", "compatib", "work with"];
        let human = ["human", "person", "agent", "complaint", "manager", "supervisor"];

        if human.iter().any(|k| lower.contains(k)) {
            "human-escalation"
        } else if order.iter().any(|k| lower.contains(k)) {
            "order-management"
        } else if product.iter().any(|k| lower.contains(k)) {
            "product-info"
        } else {
            "none"
        }
    }
}

#[async_trait]
impl CompletionProvider for KeywordProvider {
    async fn complete(&self, messages: &[ProviderMessage]) -> triage_agents::Result<String> {
        let latest = messages
            .iter()
            .rev()
            .find(|m| m.role == ProviderRole::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        // The classifier prompt asks for an id only; everything else is a
        // domain-agent prompt.
        let is_classification = messages
            .first()
            .is_some_and(|m| m.role == ProviderRole::System && m.content.contains("id only"));
        if is_classification {
            return Ok(Self::classify(latest).into());
        }
        Ok(format!(
            "Thanks for your message — here is what I found regarding \"{latest}\". \
             (local stand-in reply)"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_map_to_agent_ids() {
        assert_eq!(KeywordProvider::classify("where is my order?"), "order-management");
        assert_eq!(KeywordProvider::classify("is this in stock?"), "product-info");
        assert_eq!(KeywordProvider::classify("get me a person"), "human-escalation");
        assert_eq!(KeywordProvider::classify("xyzzy"), "none");
    }
}
