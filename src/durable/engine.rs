//! In-process workflow engine and its client handle.
//!
//! Stands in for an external durable-execution engine: instances are
//! scheduled onto the tokio runtime and tracked in an in-memory store for
//! tests or local runs. Starting an instance never blocks on its execution;
//! callers observe progress only by polling the instance status.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use chrono::Utc;
use tracing::{error, info};

use super::context::{OrchestrationContext, OrchestrationError};
use super::instance::{InstanceId, InstanceRecord, RuntimeStatus};
use crate::app::FunctionApp;

struct EngineState {
    app: Arc<FunctionApp>,
    instances: Mutex<HashMap<InstanceId, InstanceRecord>>,
}

/// Client handle for starting orchestrations and polling their status.
#[derive(Clone)]
pub struct DurableClient {
    state: Arc<EngineState>,
}

impl DurableClient {
    /// Create a client backed by the in-process engine, resolving
    /// orchestrations and activities from `app`.
    pub fn in_process(app: Arc<FunctionApp>) -> Self {
        Self {
            state: Arc::new(EngineState {
                app,
                instances: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Start a new orchestration instance.
    ///
    /// Fire-and-forget: the record is inserted as `Scheduled` and the handle
    /// returned immediately; a spawned task drives the instance to a terminal
    /// status. An unknown orchestrator name fails the instance rather than
    /// the call.
    pub fn start_new(&self, orchestrator: &str) -> InstanceId {
        let record = InstanceRecord::scheduled(InstanceId::new(), orchestrator);
        let id = record.id;
        self.state
            .instances
            .lock()
            .expect("instance store poisoned")
            .insert(id, record);
        info!(instance_id = %id, orchestrator = %orchestrator, "scheduled orchestration instance");

        let state = Arc::clone(&self.state);
        let orchestrator = orchestrator.to_string();
        tokio::spawn(run_instance(state, id, orchestrator));
        id
    }

    /// Snapshot the tracked state of an instance.
    pub fn status(&self, id: InstanceId) -> Option<InstanceRecord> {
        self.state
            .instances
            .lock()
            .expect("instance store poisoned")
            .get(&id)
            .cloned()
    }
}

async fn run_instance(state: Arc<EngineState>, id: InstanceId, orchestrator: String) {
    let Some(handler) = state.app.orchestrator(&orchestrator) else {
        let err = OrchestrationError::UnknownOrchestrator(orchestrator.clone());
        error!(instance_id = %id, error = %err, "orchestration start failed");
        transition(&state, id, RuntimeStatus::Failed, None, Some(err.to_string()));
        return;
    };

    transition(&state, id, RuntimeStatus::Running, None, None);
    let ctx = OrchestrationContext::new(id, Arc::clone(&state.app));
    match handler(ctx).await {
        Ok(output) => {
            info!(instance_id = %id, orchestrator = %orchestrator, "orchestration completed");
            transition(&state, id, RuntimeStatus::Completed, Some(output), None);
        }
        Err(err) => {
            error!(instance_id = %id, orchestrator = %orchestrator, error = %err, "orchestration failed");
            transition(&state, id, RuntimeStatus::Failed, None, Some(format!("{err:#}")));
        }
    }
}

fn transition(
    state: &EngineState,
    id: InstanceId,
    status: RuntimeStatus,
    output: Option<String>,
    error: Option<String>,
) {
    let mut instances = state.instances.lock().expect("instance store poisoned");
    if let Some(record) = instances.get_mut(&id) {
        record.status = status;
        record.output = output;
        record.error = error;
        record.updated_at = Utc::now();
    }
}
