use async_trait::async_trait;

use crate::Result;

// ── Typed provider messages ─────────────────────────────────────────────────

/// Role of a message handed to the completion provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderRole {
    System,
    User,
    Assistant,
}

/// One message in the prompt sent to the completion provider.
///
/// Only prompt-relevant fields exist here; session keys, timestamps and
/// other metadata cannot leak into provider requests.
#[derive(Debug, Clone)]
pub struct ProviderMessage {
    pub role: ProviderRole,
    pub content: String,
}

impl ProviderMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ProviderRole::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ProviderRole::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ProviderRole::Assistant,
            content: content.into(),
        }
    }
}

/// Black-box language-model capability behind the classifier and the
/// domain agents.
///
/// Probabilistic by nature: identical inputs may yield different outputs
/// across calls, and callers must not assume otherwise.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, messages: &[ProviderMessage]) -> Result<String>;
}
