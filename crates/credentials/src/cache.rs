use std::sync::Arc;

use {tokio::sync::OnceCell, tracing::debug};

use crate::{
    error::{Error, Result},
    store::ParameterStore,
};

/// Process-lifetime cache over a [`ParameterStore`].
///
/// The first successful fetch is cached forever; it is never re-fetched or
/// invalidated. Concurrent first callers converge on a single in-flight
/// fetch. A failed fetch is not cached, so a later call retries.
pub struct SecretCache {
    store: Arc<dyn ParameterStore>,
    name: String,
    value: OnceCell<String>,
}

impl SecretCache {
    #[must_use]
    pub fn new(store: Arc<dyn ParameterStore>, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
            value: OnceCell::new(),
        }
    }

    /// Return the cached credential, fetching it on first use.
    pub async fn get_credential(&self) -> Result<&str> {
        let value = self
            .value
            .get_or_try_init(|| async {
                debug!(parameter = %self.name, "fetching credential");
                match self.store.fetch(&self.name).await? {
                    Some(value) if !value.is_empty() => Ok(value),
                    _ => Err(Error::unavailable(&self.name, "parameter has no value")),
                }
            })
            .await?;
        Ok(value.as_str())
    }
}
