use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("completion provider failed: {message}")]
    Provider { message: String },

    #[error("escalation publish failed: {source}")]
    EscalationPublish {
        #[source]
        source: triage_common::Error,
    },

    #[error("unknown agent id {id:?}")]
    UnknownAgent { id: String },
}

impl Error {
    #[must_use]
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
