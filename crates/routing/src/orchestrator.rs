use std::{sync::Arc, time::Instant};

use tracing::{info, warn};

use {
    triage_agents::{AgentKind, AgentPool, Classifier},
    triage_common::types::{ChatEntry, RoutingResult},
    triage_config::RoutingPolicy,
    triage_history::HistoryStore,
    triage_telemetry::ExecutionLogger,
};

use crate::error::{Error, Result};

/// Owns the classifier, agent pool, history store, and execution logger.
///
/// Constructed at most once per process (see [`crate::RouterHandle`]) and
/// shared read-mostly across all subsequent requests; it outlives
/// individual message-handling calls.
pub struct Orchestrator {
    classifier: Box<dyn Classifier>,
    pool: AgentPool,
    history: Arc<dyn HistoryStore>,
    logger: ExecutionLogger,
    /// Precomputed fallback; `Some` only when the policy enables it.
    fallback: Option<AgentKind>,
}

impl Orchestrator {
    /// Build the orchestrator, failing fast when the fallback policy names
    /// an unregistered agent.
    pub fn new(
        classifier: Box<dyn Classifier>,
        pool: AgentPool,
        history: Arc<dyn HistoryStore>,
        logger: ExecutionLogger,
        policy: &RoutingPolicy,
    ) -> Result<Self> {
        let fallback = if policy.use_default_agent_if_none {
            let id = policy
                .default_agent
                .clone()
                .unwrap_or_else(|| AgentKind::OrderManagement.id().into());
            let kind = pool
                .resolve(&id)
                .ok_or(Error::InvalidDefaultAgent { id })?;
            Some(kind)
        } else {
            None
        };
        Ok(Self {
            classifier,
            pool,
            history,
            logger,
            fallback,
        })
    }

    /// Route one message: classify, invoke, persist, reply.
    pub async fn route_request(
        &self,
        message: &str,
        session_id: &str,
        history_key: &str,
    ) -> Result<RoutingResult> {
        let started = Instant::now();
        let decision = self
            .classifier
            .classify(message, session_id)
            .await
            .map_err(Error::Classifier)?;
        self.logger.log_classification(
            session_id,
            &decision.raw_output,
            decision.chosen.map(AgentKind::id),
            started.elapsed().as_millis() as u64,
        );

        let agent = match decision.chosen.or(self.fallback) {
            Some(agent) => agent,
            None => return Err(Error::NoAgentIdentified),
        };
        let agent_id = agent.id();

        let prior = self.history.get(history_key, agent_id).await?;

        let invoked = Instant::now();
        let reply = match self.pool.handle(agent, message, session_id, &prior).await {
            Ok(reply) => {
                self.logger.log_invocation(
                    session_id,
                    agent_id,
                    true,
                    invoked.elapsed().as_millis() as u64,
                );
                reply
            },
            Err(source) => {
                self.logger.log_invocation(
                    session_id,
                    agent_id,
                    false,
                    invoked.elapsed().as_millis() as u64,
                );
                return Err(Error::AgentExecutionFailure {
                    agent: agent_id,
                    source,
                });
            },
        };

        if reply.should_persist {
            // Policy: a persistence failure never withholds the computed
            // reply; it is logged and the record still succeeds.
            let pair = vec![ChatEntry::user(message), ChatEntry::agent(&reply.output)];
            if let Err(error) = self.history.append(history_key, agent_id, pair).await {
                warn!(
                    session = %session_id,
                    agent = %agent_id,
                    %error,
                    "history append failed; reply delivered anyway"
                );
            }
        }

        info!(
            session = %session_id,
            agent = %agent_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request routed"
        );
        Ok(RoutingResult {
            output: reply.output,
            selected_agent: agent_id.into(),
            success: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use {async_trait::async_trait, tokio::sync::Mutex};

    use {
        triage_agents::{ClassifierDecision, CompletionProvider, EscalationAgent, ProviderMessage},
        triage_common::{
            queue::EscalationQueue,
            types::{EscalationNotice, Role},
        },
        triage_history::MemoryHistoryStore,
    };

    use super::*;

    struct FixedClassifier {
        chosen: Option<AgentKind>,
    }

    #[async_trait]
    impl Classifier for FixedClassifier {
        async fn classify(
            &self,
            _message: &str,
            _session_id: &str,
        ) -> triage_agents::Result<ClassifierDecision> {
            Ok(ClassifierDecision {
                chosen: self.chosen,
                raw_output: self.chosen.map(AgentKind::id).unwrap_or("none").into(),
            })
        }
    }

    struct CannedProvider {
        reply: &'static str,
        fail: bool,
    }

    #[async_trait]
    impl CompletionProvider for CannedProvider {
        async fn complete(
            &self,
            _messages: &[ProviderMessage],
        ) -> triage_agents::Result<String> {
            if self.fail {
                return Err(triage_agents::Error::provider("model offline"));
            }
            Ok(self.reply.into())
        }
    }

    #[derive(Default)]
    struct RecordingEscalation {
        notices: Mutex<Vec<EscalationNotice>>,
    }

    #[async_trait]
    impl EscalationQueue for RecordingEscalation {
        async fn publish(&self, notice: &EscalationNotice) -> triage_common::Result<()> {
            self.notices.lock().await.push(notice.clone());
            Ok(())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl HistoryStore for FailingStore {
        async fn get(
            &self,
            _session_key: &str,
            _agent_id: &str,
        ) -> triage_history::Result<Vec<ChatEntry>> {
            Ok(vec![])
        }

        async fn append(
            &self,
            _session_key: &str,
            _agent_id: &str,
            _entries: Vec<ChatEntry>,
        ) -> triage_history::Result<()> {
            Err(triage_history::Error::unavailable("store down"))
        }
    }

    struct Fixture {
        orchestrator: Orchestrator,
        history: Arc<MemoryHistoryStore>,
        escalations: Arc<RecordingEscalation>,
    }

    fn fixture(chosen: Option<AgentKind>, policy: &RoutingPolicy) -> Fixture {
        fixture_with(chosen, policy, false)
    }

    fn fixture_with(chosen: Option<AgentKind>, policy: &RoutingPolicy, fail: bool) -> Fixture {
        let history = Arc::new(MemoryHistoryStore::new(10));
        let escalations = Arc::new(RecordingEscalation::default());
        let provider = Arc::new(CannedProvider {
            reply: "your order #123 shipped yesterday",
            fail,
        });
        let pool = AgentPool::new(
            provider,
            EscalationAgent::new(escalations.clone()),
        );
        let orchestrator = Orchestrator::new(
            Box::new(FixedClassifier { chosen }),
            pool,
            history.clone(),
            ExecutionLogger::disabled(),
            policy,
        )
        .unwrap();
        Fixture {
            orchestrator,
            history,
            escalations,
        }
    }

    #[tokio::test]
    async fn routed_reply_carries_agent_id_and_persists_pair() {
        let f = fixture(Some(AgentKind::OrderManagement), &RoutingPolicy::default());

        let result = f
            .orchestrator
            .route_request("Where is my order #123?", "abc", "abc")
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.selected_agent, "order-management");
        assert_eq!(result.output, "your order #123 shipped yesterday");

        let entries = f.history.get("abc", "order-management").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, Role::User);
        assert_eq!(entries[0].text, "Where is my order #123?");
        assert_eq!(entries[1].role, Role::Agent);
    }

    #[tokio::test]
    async fn second_message_sees_first_exchange() {
        let f = fixture(Some(AgentKind::OrderManagement), &RoutingPolicy::default());

        f.orchestrator
            .route_request("first question", "abc", "abc")
            .await
            .unwrap();
        f.orchestrator
            .route_request("second question", "abc", "abc")
            .await
            .unwrap();

        let entries = f.history.get("abc", "order-management").await.unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].text, "first question");
        assert_eq!(entries[2].text, "second question");
    }

    #[tokio::test]
    async fn none_without_fallback_is_no_agent_identified() {
        let f = fixture(None, &RoutingPolicy::default());
        let err = f
            .orchestrator
            .route_request("gibberish", "abc", "abc")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoAgentIdentified));
    }

    #[tokio::test]
    async fn none_with_fallback_routes_to_default_agent() {
        let policy = RoutingPolicy {
            use_default_agent_if_none: true,
            default_agent: Some("product-info".into()),
        };
        let f = fixture(None, &policy);
        let result = f
            .orchestrator
            .route_request("something vague", "abc", "abc")
            .await
            .unwrap();
        assert_eq!(result.selected_agent, "product-info");
    }

    #[tokio::test]
    async fn unregistered_default_agent_fails_construction() {
        let policy = RoutingPolicy {
            use_default_agent_if_none: true,
            default_agent: Some("billing".into()),
        };
        let history = Arc::new(MemoryHistoryStore::new(10));
        let provider = Arc::new(CannedProvider {
            reply: "x",
            fail: false,
        });
        let pool = AgentPool::new(
            provider,
            EscalationAgent::new(Arc::new(RecordingEscalation::default())),
        );
        let err = Orchestrator::new(
            Box::new(FixedClassifier { chosen: None }),
            pool,
            history,
            ExecutionLogger::disabled(),
            &policy,
        )
        .err()
        .map(|e| matches!(e, Error::InvalidDefaultAgent { .. }));
        assert_eq!(err, Some(true));
    }

    #[tokio::test]
    async fn escalation_publishes_notice_and_skips_history() {
        let f = fixture(Some(AgentKind::HumanEscalation), &RoutingPolicy::default());

        let result = f
            .orchestrator
            .route_request("I demand a human!", "abc", "abc")
            .await
            .unwrap();
        assert_eq!(result.selected_agent, "human-escalation");
        assert_eq!(result.output, triage_agents::ESCALATION_ACK);

        let notices = f.escalations.notices.lock().await;
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].session_id, "abc");
        assert_eq!(notices[0].message, "I demand a human!");
        drop(notices);

        // `should_persist = false`: no history under any agent key.
        assert!(f.history.get("abc", "human-escalation").await.unwrap().is_empty());
        assert!(f.history.get("abc", "order-management").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn agent_failure_surfaces_as_execution_failure() {
        let f = fixture_with(
            Some(AgentKind::OrderManagement),
            &RoutingPolicy::default(),
            true,
        );
        let err = f
            .orchestrator
            .route_request("where is it", "abc", "abc")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::AgentExecutionFailure {
                agent: "order-management",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn persistence_failure_still_returns_the_reply() {
        let provider = Arc::new(CannedProvider {
            reply: "computed reply",
            fail: false,
        });
        let pool = AgentPool::new(
            provider,
            EscalationAgent::new(Arc::new(RecordingEscalation::default())),
        );
        let orchestrator = Orchestrator::new(
            Box::new(FixedClassifier {
                chosen: Some(AgentKind::OrderManagement),
            }),
            pool,
            Arc::new(FailingStore),
            ExecutionLogger::disabled(),
            &RoutingPolicy::default(),
        )
        .unwrap();

        let result = orchestrator
            .route_request("where is it", "abc", "abc")
            .await
            .unwrap();
        assert_eq!(result.output, "computed reply");
        assert!(result.success);
    }
}
