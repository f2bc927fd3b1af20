use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("required environment variable {name} is not set")]
    MissingVariable { name: &'static str },

    #[error("environment variable {name} has invalid value {value:?}: {reason}")]
    InvalidVariable {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl Error {
    #[must_use]
    pub fn missing(name: &'static str) -> Self {
        Self::MissingVariable { name }
    }

    #[must_use]
    pub fn invalid(name: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVariable {
            name,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
