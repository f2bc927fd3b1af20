use std::sync::Arc;

use {chrono::Utc, tokio::sync::mpsc, tracing::warn};

use triage_config::LoggingToggles;

use crate::{event::ExecutionEvent, sink::LogSink};

/// Clone-cheap handle for the execution log side-channel.
///
/// `log_*` methods only enqueue onto an unbounded channel and return
/// immediately. The drain task spawned by [`ExecutionLogger::spawn`]
/// forwards events to the sink; sink failures are logged and dropped.
#[derive(Clone)]
pub struct ExecutionLogger {
    sender: Option<mpsc::UnboundedSender<ExecutionEvent>>,
    toggles: LoggingToggles,
}

impl ExecutionLogger {
    /// Start the drain task and return the enqueue handle.
    #[must_use]
    pub fn spawn(sink: Arc<dyn LogSink>, toggles: LoggingToggles) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<ExecutionEvent>();
        tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                if let Err(reason) = sink.record(event).await {
                    warn!(%reason, "execution log sink failed; event dropped");
                }
            }
        });
        Self {
            sender: Some(sender),
            toggles,
        }
    }

    /// A logger that records nothing. For tests and minimal setups.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            sender: None,
            toggles: LoggingToggles {
                classifier_decisions: false,
                agent_invocations: false,
            },
        }
    }

    pub fn log_classification(
        &self,
        session_id: &str,
        raw_output: &str,
        chosen_agent: Option<&str>,
        elapsed_ms: u64,
    ) {
        if !self.toggles.classifier_decisions {
            return;
        }
        self.enqueue(ExecutionEvent::Classification {
            session_id: session_id.into(),
            raw_output: raw_output.into(),
            chosen_agent: chosen_agent.map(Into::into),
            elapsed_ms,
            timestamp_ms: Utc::now().timestamp_millis(),
        });
    }

    pub fn log_invocation(&self, session_id: &str, agent_id: &str, success: bool, elapsed_ms: u64) {
        if !self.toggles.agent_invocations {
            return;
        }
        self.enqueue(ExecutionEvent::AgentInvocation {
            session_id: session_id.into(),
            agent_id: agent_id.into(),
            success,
            elapsed_ms,
            timestamp_ms: Utc::now().timestamp_millis(),
        });
    }

    fn enqueue(&self, event: ExecutionEvent) {
        if let Some(sender) = &self.sender {
            // A closed channel means the drain task is gone; dropping the
            // event is the contract, never blocking the routing path.
            let _ = sender.send(event);
        }
    }
}
