use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("credential {name:?} unavailable: {reason}")]
    CredentialUnavailable { name: String, reason: String },
}

impl Error {
    #[must_use]
    pub fn unavailable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CredentialUnavailable {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
