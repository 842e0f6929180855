//! Durable orchestration collaborator.
//!
//! The host consumes a workflow engine through two operations: starting a
//! named orchestration (fire-and-forget, returning an instance handle) and,
//! from inside an orchestration, awaiting a named activity. This module ships
//! an in-process engine implementing that contract for local runs and tests;
//! checkpointing, history replay, and retry policies belong to a real engine
//! and are not modeled here.

mod context;
mod engine;
mod instance;

pub use context::{OrchestrationContext, OrchestrationError};
pub use engine::DurableClient;
pub use instance::{InstanceId, InstanceRecord, RuntimeStatus};
