//! Fire-and-forget execution logging for the routing path.
//!
//! The routing path only enqueues; a spawned drain task forwards events to
//! the configured sink. A slow or failing sink can never fail or delay a
//! route request.

pub mod event;
pub mod logger;
pub mod sink;

pub use {
    event::ExecutionEvent,
    logger::ExecutionLogger,
    sink::{LogSink, TracingLogSink},
};
