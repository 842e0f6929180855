//! Hail - a minimal durable greeting function host.
//!
//! Functions are registered in an explicit table ([`FunctionApp`]) by trigger
//! kind: HTTP routes, orchestrations, and activities. An axum gateway
//! ([`FunctionHost`]) serves the HTTP triggers and exposes the orchestration
//! entry point; the workflow engine is consumed through a [`DurableClient`]
//! capability handed to the gateway.

pub mod app;
pub mod config;
pub mod durable;
pub mod greeting;
pub mod request;
pub mod server;

pub use app::{FunctionApp, HttpTrigger};
pub use config::Config;
pub use durable::{
    DurableClient, InstanceId, InstanceRecord, OrchestrationContext, OrchestrationError,
    RuntimeStatus,
};
pub use greeting::greeting_app;
pub use request::FunctionRequest;
pub use server::FunctionHost;
