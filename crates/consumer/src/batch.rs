use {
    serde::Serialize,
    tracing::{error, info},
};

use {
    triage_common::{
        queue::DeliveryQueue,
        types::{InboundRecord, OutboundMessage},
    },
    triage_routing::RouterHandle,
};

use crate::error::RecordError;

/// Result of one record's trip through parse → route → publish.
#[derive(Debug)]
pub enum RecordOutcome {
    Delivered {
        session_id: String,
        selected_agent: String,
    },
    Failed {
        /// Unknown when the payload never parsed.
        session_id: Option<String>,
        error: RecordError,
    },
}

/// Per-batch report. Partial completion is not rolled back.
#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<RecordOutcome>,
}

/// Host-facing summary of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub message: String,
}

impl BatchReport {
    /// Records attempted, delivered or not.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn delivered(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RecordOutcome::Delivered { .. }))
            .count()
    }

    #[must_use]
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            message: format!("Processed {} messages", self.processed()),
        }
    }
}

/// Process one batch of raw inbound payloads.
///
/// Each record is handled independently; failures are reported in the
/// batch report and logged, and the loop moves on.
pub async fn process_batch(
    handle: &RouterHandle,
    delivery: &dyn DeliveryQueue,
    records: &[String],
) -> BatchReport {
    let mut outcomes = Vec::with_capacity(records.len());
    for raw in records {
        let outcome = process_record(handle, delivery, raw).await;
        if let RecordOutcome::Failed { session_id, error } = &outcome {
            error!(
                session = session_id.as_deref().unwrap_or("unknown"),
                %error,
                "record failed; continuing batch"
            );
        }
        outcomes.push(outcome);
    }

    let report = BatchReport { outcomes };
    info!(
        processed = report.processed(),
        delivered = report.delivered(),
        "batch complete"
    );
    report
}

async fn process_record(
    handle: &RouterHandle,
    delivery: &dyn DeliveryQueue,
    raw: &str,
) -> RecordOutcome {
    let record: InboundRecord = match serde_json::from_str(raw) {
        Ok(record) => record,
        Err(source) => {
            return RecordOutcome::Failed {
                session_id: None,
                error: source.into(),
            };
        },
    };

    // Session identity doubles as the history key.
    let result = match handle
        .route_request(&record.message, &record.session_id, &record.session_id)
        .await
    {
        Ok(result) => result,
        Err(source) => {
            return RecordOutcome::Failed {
                session_id: Some(record.session_id),
                error: source.into(),
            };
        },
    };

    let outbound = OutboundMessage::customer(result.output);
    if let Err(source) = delivery.publish(&outbound).await {
        return RecordOutcome::Failed {
            session_id: Some(record.session_id),
            error: RecordError::Publish { source },
        };
    }

    RecordOutcome::Delivered {
        session_id: record.session_id,
        selected_agent: result.selected_agent,
    }
}
