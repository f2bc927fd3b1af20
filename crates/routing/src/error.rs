use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Initialization-fatal: routing is blocked until the credential
    /// resolves. Not cached; the next request retries the fetch.
    #[error(transparent)]
    Credential(#[from] triage_credentials::Error),

    #[error("no agent identified for this message")]
    NoAgentIdentified,

    #[error("classifier failed: {0}")]
    Classifier(#[source] triage_agents::Error),

    #[error("agent {agent} failed: {source}")]
    AgentExecutionFailure {
        agent: &'static str,
        #[source]
        source: triage_agents::Error,
    },

    /// History store unavailable while loading prior context.
    #[error(transparent)]
    Persistence(#[from] triage_history::Error),

    /// Fallback is enabled but the configured default agent id does not
    /// name a registered agent.
    #[error("default agent {id:?} is not registered")]
    InvalidDefaultAgent { id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
