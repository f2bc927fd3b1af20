use std::{fmt::Write, sync::Arc};

use {async_trait::async_trait, tracing::debug};

use crate::{
    Result,
    pool::{AgentDescriptor, AgentKind},
    provider::{CompletionProvider, ProviderMessage},
};

/// Outcome of classifying one inbound message.
///
/// Not persisted anywhere beyond the execution log. `chosen` is `None`
/// when no registered agent confidently applies.
#[derive(Debug, Clone)]
pub struct ClassifierDecision {
    pub chosen: Option<AgentKind>,
    /// Verbatim model output, kept for the execution log.
    pub raw_output: String,
}

/// Select the best-matching registered agent for a message.
///
/// Backed by a probabilistic model: identical inputs may classify
/// differently across calls.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, message: &str, session_id: &str) -> Result<ClassifierDecision>;
}

/// Classifier that asks the completion provider to name one agent id.
pub struct LlmClassifier {
    provider: Arc<dyn CompletionProvider>,
    decision_space: Vec<AgentDescriptor>,
}

impl LlmClassifier {
    #[must_use]
    pub fn new(provider: Arc<dyn CompletionProvider>, decision_space: Vec<AgentDescriptor>) -> Self {
        Self {
            provider,
            decision_space,
        }
    }

    fn system_prompt(&self) -> String {
        let mut prompt = String::from(
            "You route customer-support messages to specialized agents. \
             Reply with exactly one agent id from the list below, or the word \
             \"none\" if no agent applies. Reply with the id only.\n\nAgents:\n",
        );
        for descriptor in &self.decision_space {
            let _ = writeln!(prompt, "- {}: {}", descriptor.id, descriptor.description);
        }
        prompt
    }

    /// Map raw model output onto the registered id set.
    ///
    /// Exact (trimmed, case-insensitive) match first; otherwise the first
    /// registered id appearing as a substring, tolerating chatty models.
    fn parse(&self, raw: &str) -> Option<AgentKind> {
        let normalized = raw.trim().to_ascii_lowercase();
        let stripped =
            normalized.trim_matches(|c: char| !(c.is_ascii_alphanumeric() || c == '-'));
        if stripped == "none" {
            return None;
        }
        if let Some(descriptor) = self.decision_space.iter().find(|d| d.id == stripped) {
            return Some(descriptor.kind);
        }
        self.decision_space
            .iter()
            .find(|d| normalized.contains(d.id))
            .map(|d| d.kind)
    }
}

#[async_trait]
impl Classifier for LlmClassifier {
    async fn classify(&self, message: &str, session_id: &str) -> Result<ClassifierDecision> {
        let messages = [
            ProviderMessage::system(self.system_prompt()),
            ProviderMessage::user(message),
        ];
        let raw_output = self.provider.complete(&messages).await?;
        let chosen = self.parse(&raw_output);
        debug!(
            session = %session_id,
            chosen = chosen.map(AgentKind::id).unwrap_or("none"),
            raw = %raw_output,
            "classified message"
        );
        Ok(ClassifierDecision { chosen, raw_output })
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::Mutex;

    use super::*;

    struct ScriptedProvider {
        replies: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(vec![reply.into()]),
            })
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn complete(&self, _messages: &[ProviderMessage]) -> Result<String> {
            let mut replies = self.replies.lock().await;
            Ok(replies.pop().unwrap_or_else(|| "none".into()))
        }
    }

    fn classifier(provider: Arc<ScriptedProvider>) -> LlmClassifier {
        let space = AgentKind::ALL.iter().map(|kind| kind.descriptor()).collect();
        LlmClassifier::new(provider, space)
    }

    #[tokio::test]
    async fn exact_id_is_chosen() {
        let c = classifier(ScriptedProvider::replying("order-management"));
        let decision = c.classify("where is my order #123?", "abc").await.unwrap();
        assert_eq!(decision.chosen, Some(AgentKind::OrderManagement));
        assert_eq!(decision.raw_output, "order-management");
    }

    #[tokio::test]
    async fn chatty_output_containing_an_id_still_resolves() {
        let c = classifier(ScriptedProvider::replying(
            "The best agent for this is `product-info`.",
        ));
        let decision = c.classify("does it work with USB-C?", "abc").await.unwrap();
        assert_eq!(decision.chosen, Some(AgentKind::ProductInfo));
    }

    #[tokio::test]
    async fn case_and_whitespace_are_tolerated() {
        let c = classifier(ScriptedProvider::replying("  Human-Escalation \n"));
        let decision = c.classify("get me a person", "abc").await.unwrap();
        assert_eq!(decision.chosen, Some(AgentKind::HumanEscalation));
    }

    #[tokio::test]
    async fn none_maps_to_no_agent() {
        let c = classifier(ScriptedProvider::replying("none"));
        let decision = c.classify("asdf qwerty", "abc").await.unwrap();
        assert_eq!(decision.chosen, None);
        assert_eq!(decision.raw_output, "none");
    }

    #[tokio::test]
    async fn unrecognized_output_maps_to_no_agent() {
        let c = classifier(ScriptedProvider::replying("billing-department"));
        let decision = c.classify("invoice question", "abc").await.unwrap();
        assert_eq!(decision.chosen, None);
    }

    #[test]
    fn prompt_lists_every_registered_agent() {
        let c = classifier(ScriptedProvider::replying("none"));
        let prompt = c.system_prompt();
        for kind in AgentKind::ALL {
            assert!(prompt.contains(kind.id()), "missing {}", kind.id());
        }
    }
}
