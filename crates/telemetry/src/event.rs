use serde::Serialize;

/// One observed step on the routing path.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutionEvent {
    Classification {
        session_id: String,
        /// Verbatim classifier output.
        raw_output: String,
        /// Registered agent id, or `None` when nothing matched.
        chosen_agent: Option<String>,
        elapsed_ms: u64,
        timestamp_ms: i64,
    },
    AgentInvocation {
        session_id: String,
        agent_id: String,
        success: bool,
        elapsed_ms: u64,
        timestamp_ms: i64,
    },
}
