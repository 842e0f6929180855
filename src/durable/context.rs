//! Capabilities handed to a running orchestration.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::instance::InstanceId;
use crate::app::FunctionApp;

/// Errors surfaced while driving an orchestration instance.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("orchestrator `{0}` is not registered")]
    UnknownOrchestrator(String),

    #[error("activity `{0}` is not registered")]
    UnknownActivity(String),

    #[error("activity `{name}` failed: {source}")]
    ActivityFailed {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Handle an orchestration handler uses to reach the engine.
///
/// `call_activity` is the only suspension point. Between suspension points a
/// handler must stay deterministic and free of observable side effects: an
/// engine with replay semantics may re-execute the handler from the start,
/// substituting recorded results only for sub-calls that already completed.
pub struct OrchestrationContext {
    instance_id: InstanceId,
    app: Arc<FunctionApp>,
}

impl OrchestrationContext {
    pub(crate) fn new(instance_id: InstanceId, app: Arc<FunctionApp>) -> Self {
        Self { instance_id, app }
    }

    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    /// Invoke a registered activity and await its result.
    pub async fn call_activity(
        &self,
        name: &str,
        input: impl Into<String>,
    ) -> Result<String, OrchestrationError> {
        let activity = self
            .app
            .activity(name)
            .ok_or_else(|| OrchestrationError::UnknownActivity(name.to_string()))?;

        debug!(instance_id = %self.instance_id, activity = %name, "dispatching activity");
        activity(input.into())
            .await
            .map_err(|source| OrchestrationError::ActivityFailed {
                name: name.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn context(app: FunctionApp) -> OrchestrationContext {
        OrchestrationContext::new(InstanceId::new(), Arc::new(app))
    }

    #[tokio::test]
    async fn call_activity_awaits_the_registered_handler() {
        let app = FunctionApp::new()
            .activity_trigger("shout", |input: String| async move {
                Ok(input.to_uppercase())
            });

        let result = context(app)
            .call_activity("shout", "hey")
            .await
            .expect("activity result");
        assert_eq!(result, "HEY");
    }

    #[tokio::test]
    async fn unknown_activity_is_an_error() {
        let err = context(FunctionApp::new())
            .call_activity("missing", "x")
            .await
            .expect_err("unregistered activity");
        assert!(matches!(err, OrchestrationError::UnknownActivity(_)));
        assert!(err.to_string().contains("missing"));
    }

    #[tokio::test]
    async fn activity_failure_carries_the_activity_name() {
        let app = FunctionApp::new()
            .activity_trigger("flaky", |_input: String| async move {
                Err(anyhow!("downstream unavailable"))
            });

        let err = context(app)
            .call_activity("flaky", "x")
            .await
            .expect_err("failing activity");
        assert!(err.to_string().contains("flaky"));
    }
}
