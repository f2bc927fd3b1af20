use thiserror::Error;

/// Why one record in a batch failed. Carried as a value in the batch
/// report, never used as control flow across records.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Routing(#[from] triage_routing::Error),

    #[error("delivery publish failed: {source}")]
    Publish {
        #[source]
        source: triage_common::Error,
    },
}
