use {async_trait::async_trait, tracing::info};

use {crate::event::ExecutionEvent, triage_common::Result};

/// Destination for execution events: an observability queue in
/// production, ordinary tracing by default.
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn record(&self, event: ExecutionEvent) -> Result<()>;
}

/// Default sink: emit each event as a structured tracing line.
pub struct TracingLogSink;

#[async_trait]
impl LogSink for TracingLogSink {
    async fn record(&self, event: ExecutionEvent) -> Result<()> {
        match &event {
            ExecutionEvent::Classification {
                session_id,
                raw_output,
                chosen_agent,
                elapsed_ms,
                ..
            } => info!(
                session = %session_id,
                chosen = chosen_agent.as_deref().unwrap_or("none"),
                raw = %raw_output,
                elapsed_ms,
                "classifier decision"
            ),
            ExecutionEvent::AgentInvocation {
                session_id,
                agent_id,
                success,
                elapsed_ms,
                ..
            } => info!(
                session = %session_id,
                agent = %agent_id,
                success,
                elapsed_ms,
                "agent invocation"
            ),
        }
        Ok(())
    }
}
