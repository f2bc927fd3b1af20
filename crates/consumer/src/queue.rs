use {async_trait::async_trait, tokio::sync::Mutex};

use triage_common::{
    Result,
    queue::{DeliveryQueue, EscalationQueue},
    types::{EscalationNotice, OutboundMessage},
};

/// In-process delivery queue for tests and local runs.
#[derive(Default)]
pub struct MemoryDeliveryQueue {
    messages: Mutex<Vec<OutboundMessage>>,
}

impl MemoryDeliveryQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn drain(&self) -> Vec<OutboundMessage> {
        std::mem::take(&mut *self.messages.lock().await)
    }
}

#[async_trait]
impl DeliveryQueue for MemoryDeliveryQueue {
    async fn publish(&self, message: &OutboundMessage) -> Result<()> {
        self.messages.lock().await.push(message.clone());
        Ok(())
    }
}

/// In-process escalation queue for tests and local runs.
#[derive(Default)]
pub struct MemoryEscalationQueue {
    notices: Mutex<Vec<EscalationNotice>>,
}

impl MemoryEscalationQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn drain(&self) -> Vec<EscalationNotice> {
        std::mem::take(&mut *self.notices.lock().await)
    }
}

#[async_trait]
impl EscalationQueue for MemoryEscalationQueue {
    async fn publish(&self, notice: &EscalationNotice) -> Result<()> {
        self.notices.lock().await.push(notice.clone());
        Ok(())
    }
}
