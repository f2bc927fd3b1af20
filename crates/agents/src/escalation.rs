use std::sync::Arc;

use tracing::info;

use triage_common::{queue::EscalationQueue, types::EscalationNotice};

use crate::{
    error::{Error, Result},
    pool::AgentReply,
};

/// Static acknowledgement routed back to the customer after a handoff.
pub const ESCALATION_ACK: &str =
    "Thanks for reaching out. A support specialist will get back to you shortly.";

/// Human-escalation path: publishes a handoff notice instead of answering.
///
/// The exchange is not persisted: conversation history belongs to the
/// originating domain agent, not the escalation channel.
pub struct EscalationAgent {
    queue: Arc<dyn EscalationQueue>,
}

impl EscalationAgent {
    #[must_use]
    pub fn new(queue: Arc<dyn EscalationQueue>) -> Self {
        Self { queue }
    }

    pub async fn handle(&self, message: &str, session_id: &str) -> Result<AgentReply> {
        let notice = EscalationNotice {
            session_id: session_id.into(),
            message: message.into(),
        };
        self.queue
            .publish(&notice)
            .await
            .map_err(|source| Error::EscalationPublish { source })?;

        info!(session = %session_id, "escalated to human support");
        Ok(AgentReply {
            output: ESCALATION_ACK.into(),
            should_persist: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use {async_trait::async_trait, tokio::sync::Mutex};

    use super::*;

    #[derive(Default)]
    struct RecordingQueue {
        notices: Mutex<Vec<EscalationNotice>>,
    }

    #[async_trait]
    impl EscalationQueue for RecordingQueue {
        async fn publish(&self, notice: &EscalationNotice) -> triage_common::Result<()> {
            self.notices.lock().await.push(notice.clone());
            Ok(())
        }
    }

    struct BrokenQueue;

    #[async_trait]
    impl EscalationQueue for BrokenQueue {
        async fn publish(&self, _notice: &EscalationNotice) -> triage_common::Result<()> {
            Err(triage_common::Error::message("queue offline"))
        }
    }

    #[tokio::test]
    async fn publishes_notice_and_returns_static_ack() {
        let queue = Arc::new(RecordingQueue::default());
        let agent = EscalationAgent::new(queue.clone());

        let reply = agent.handle("I want a refund NOW", "abc").await.unwrap();
        assert_eq!(reply.output, ESCALATION_ACK);
        assert!(!reply.should_persist);

        let notices = queue.notices.lock().await;
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].session_id, "abc");
        assert_eq!(notices[0].message, "I want a refund NOW");
    }

    #[tokio::test]
    async fn publish_failure_surfaces_as_error() {
        let agent = EscalationAgent::new(Arc::new(BrokenQueue));
        let err = agent.handle("help", "abc").await.unwrap_err();
        assert!(matches!(err, Error::EscalationPublish { .. }));
    }
}
