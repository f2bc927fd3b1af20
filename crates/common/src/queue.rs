//! Outbound transport seams.
//!
//! The delivery and escalation queues are externally-synchronized
//! resources; publishes are independent and the core adds no locking of
//! its own on top of them.

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{EscalationNotice, OutboundMessage},
};

/// Delivery queue for customer-facing replies.
#[async_trait]
pub trait DeliveryQueue: Send + Sync {
    async fn publish(&self, message: &OutboundMessage) -> Result<()>;
}

/// Escalation queue for human-handoff notices.
#[async_trait]
pub trait EscalationQueue: Send + Sync {
    async fn publish(&self, notice: &EscalationNotice) -> Result<()>;
}
