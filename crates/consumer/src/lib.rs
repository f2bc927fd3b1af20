//! Batch consumer loop: pull inbound records, route each one, publish
//! replies.
//!
//! Records in a batch are processed sequentially with isolated failure
//! domains: a bad record is reported and skipped, never allowed to abort
//! its siblings. At-least-once semantics: nothing is rolled back, and a
//! lost publish is the redelivery mechanism's problem.

pub mod batch;
pub mod error;
pub mod queue;

pub use {
    batch::{BatchReport, BatchSummary, RecordOutcome, process_batch},
    error::RecordError,
    queue::{MemoryDeliveryQueue, MemoryEscalationQueue},
};
