use async_trait::async_trait;

use crate::error::{Error, Result};

/// Key-value parameter interface returning a secret string by name.
///
/// Implementations decide whether decryption happens server-side or here;
/// callers only see the plaintext value. A missing parameter is `Ok(None)`,
/// a transport failure is `Err`.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<Option<String>>;
}

/// Parameter store backed by process environment variables.
///
/// Local-run backend: the parameter name is upper-cased with separators
/// mapped to underscores (`triage/classifier-api-key` →
/// `TRIAGE_CLASSIFIER_API_KEY`).
pub struct EnvParameterStore;

impl EnvParameterStore {
    #[must_use]
    pub fn variable_for(name: &str) -> String {
        name.chars()
            .map(|c| match c {
                '/' | '-' | '.' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect()
    }
}

#[async_trait]
impl ParameterStore for EnvParameterStore {
    async fn fetch(&self, name: &str) -> Result<Option<String>> {
        let variable = Self::variable_for(name);
        match std::env::var(&variable) {
            Ok(value) if !value.is_empty() => Ok(Some(value)),
            Ok(_) => Ok(None),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(err) => Err(Error::unavailable(name, err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_name_maps_to_env_variable() {
        assert_eq!(
            EnvParameterStore::variable_for("triage/classifier-api-key"),
            "TRIAGE_CLASSIFIER_API_KEY"
        );
    }
}
