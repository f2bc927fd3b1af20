use std::sync::Arc;

use {tokio::sync::OnceCell, tracing::info};

use {
    triage_agents::{AgentPool, CompletionProvider, EscalationAgent, LlmClassifier},
    triage_common::{queue::EscalationQueue, types::RoutingResult},
    triage_config::RouterConfig,
    triage_credentials::{ParameterStore, SecretCache},
    triage_history::HistoryStore,
    triage_telemetry::ExecutionLogger,
};

use crate::{Result, orchestrator::Orchestrator};

/// Build a completion provider from the fetched classifier credential.
pub type ProviderFactory = Box<dyn Fn(&str) -> Arc<dyn CompletionProvider> + Send + Sync>;

/// Everything the orchestrator needs from the host.
pub struct RouterDeps {
    pub config: RouterConfig,
    pub parameters: Arc<dyn ParameterStore>,
    pub provider_factory: ProviderFactory,
    pub history: Arc<dyn HistoryStore>,
    pub escalation_queue: Arc<dyn EscalationQueue>,
    pub logger: ExecutionLogger,
}

/// Explicitly passed, thread-safe handle to the lazily built orchestrator.
///
/// The first caller triggers credential fetch and agent registration;
/// concurrent first callers await the same in-flight initialization. A
/// failed initialization is not cached, so the next call retries it.
pub struct RouterHandle {
    deps: RouterDeps,
    secrets: SecretCache,
    cell: OnceCell<Arc<Orchestrator>>,
}

impl RouterHandle {
    #[must_use]
    pub fn new(deps: RouterDeps) -> Self {
        let secrets = SecretCache::new(
            deps.parameters.clone(),
            deps.config.credential_name.clone(),
        );
        Self {
            deps,
            secrets,
            cell: OnceCell::new(),
        }
    }

    /// Initialize the orchestrator on first use and return it.
    pub async fn ensure(&self) -> Result<&Arc<Orchestrator>> {
        self.cell
            .get_or_try_init(|| async {
                let credential = self.secrets.get_credential().await?;
                let provider = (self.deps.provider_factory)(credential);

                let escalation = EscalationAgent::new(self.deps.escalation_queue.clone());
                let pool = AgentPool::new(provider.clone(), escalation);
                let classifier = Box::new(LlmClassifier::new(provider, pool.descriptors()));

                let orchestrator = Orchestrator::new(
                    classifier,
                    pool,
                    self.deps.history.clone(),
                    self.deps.logger.clone(),
                    &self.deps.config.policy,
                )?;
                info!("orchestrator initialized");
                Ok(Arc::new(orchestrator))
            })
            .await
    }

    /// Route a message through the (lazily built) orchestrator.
    pub async fn route_request(
        &self,
        message: &str,
        session_id: &str,
        history_key: &str,
    ) -> Result<RoutingResult> {
        let orchestrator = self.ensure().await?;
        orchestrator
            .route_request(message, session_id, history_key)
            .await
    }
}
