use std::collections::{HashMap, VecDeque};

use {async_trait::async_trait, tokio::sync::Mutex, tracing::trace};

use triage_common::types::ChatEntry;

use crate::{Result, key::composite_key};

/// Ordered, bounded conversation history keyed by (session, agent).
///
/// `append` is expected to truncate: after it returns, the key holds at
/// most the window's worth of entries, oldest evicted first. Reads always
/// return entries in append order.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn get(&self, session_key: &str, agent_id: &str) -> Result<Vec<ChatEntry>>;
    async fn append(&self, session_key: &str, agent_id: &str, entries: Vec<ChatEntry>)
    -> Result<()>;
}

/// In-process [`HistoryStore`] used by tests and local runs.
///
/// The configured TTL (attribute name + duration) is a managed-backend
/// concern; this store records nothing time-based and performs no
/// clock-driven eviction.
pub struct MemoryHistoryStore {
    window_pairs: usize,
    conversations: Mutex<HashMap<String, VecDeque<ChatEntry>>>,
}

impl MemoryHistoryStore {
    #[must_use]
    pub fn new(window_pairs: usize) -> Self {
        Self {
            window_pairs,
            conversations: Mutex::new(HashMap::new()),
        }
    }

    /// Upper bound on entries per key: one user + one agent line per pair.
    fn max_entries(&self) -> usize {
        self.window_pairs * 2
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn get(&self, session_key: &str, agent_id: &str) -> Result<Vec<ChatEntry>> {
        let key = composite_key(session_key, agent_id);
        let conversations = self.conversations.lock().await;
        Ok(conversations
            .get(&key)
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn append(
        &self,
        session_key: &str,
        agent_id: &str,
        entries: Vec<ChatEntry>,
    ) -> Result<()> {
        let key = composite_key(session_key, agent_id);
        let mut conversations = self.conversations.lock().await;
        let conversation = conversations.entry(key.clone()).or_default();
        conversation.extend(entries);
        while conversation.len() > self.max_entries() {
            conversation.pop_front();
        }
        trace!(key = %key, len = conversation.len(), "history appended");
        Ok(())
    }
}
