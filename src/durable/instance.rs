//! Orchestration instance identity and tracked state.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Unique identifier for an orchestration instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(pub Uuid);

impl InstanceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for InstanceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Lifecycle of an orchestration instance.
///
/// Scheduled -> Running -> Completed | Failed. Terminal states carry the
/// output or error on the owning [`InstanceRecord`]. There is no cancellation
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeStatus {
    Scheduled,
    Running,
    Completed,
    Failed,
}

impl RuntimeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeStatus::Scheduled => "scheduled",
            RuntimeStatus::Running => "running",
            RuntimeStatus::Completed => "completed",
            RuntimeStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RuntimeStatus::Completed | RuntimeStatus::Failed)
    }
}

impl std::fmt::Display for RuntimeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracked state of one orchestration instance.
#[derive(Debug, Clone)]
pub struct InstanceRecord {
    pub id: InstanceId,
    /// Name of the orchestration the instance runs.
    pub orchestrator: String,
    pub status: RuntimeStatus,
    pub output: Option<String>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InstanceRecord {
    pub fn scheduled(id: InstanceId, orchestrator: &str) -> Self {
        let now = Utc::now();
        Self {
            id,
            orchestrator: orchestrator.to_string(),
            status: RuntimeStatus::Scheduled,
            output: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }
}
