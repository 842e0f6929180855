//! The shipped greeting functions.
//!
//! Two plain HTTP endpoints answer with a greeting for an optional `name`
//! parameter, and a minimal orchestration (`hello_orchestrator`) invokes the
//! `hello` activity with a fixed input and returns its result.

use axum::http::Method;

use crate::app::FunctionApp;
use crate::durable::OrchestrationContext;
use crate::request::FunctionRequest;

/// Fallback for `/hello_world` when no name is supplied.
pub const HELLO_WORLD_FALLBACK: &str = "Hello from hail!";

/// Fallback for `/container_hello_world` when no name is supplied.
pub const CONTAINER_HELLO_WORLD_FALLBACK: &str = "This HTTP triggered function executed \
    successfully. Pass a name in the query string or in the request body for a personalized \
    response.";

/// Format a greeting for an optional name.
///
/// Non-empty names produce `"Hello, {name}!"`; otherwise `fallback` is
/// returned verbatim. Pure and deterministic. The `hello` activity greets
/// without the comma; the two spellings are intentionally distinct (see
/// DESIGN.md).
pub fn greet(name: Option<&str>, fallback: &str) -> String {
    match name {
        Some(name) if !name.is_empty() => format!("Hello, {name}!"),
        _ => fallback.to_string(),
    }
}

pub async fn hello_world(req: FunctionRequest) -> String {
    greet(req.name().as_deref(), HELLO_WORLD_FALLBACK)
}

pub async fn container_hello_world(req: FunctionRequest) -> String {
    greet(req.name().as_deref(), CONTAINER_HELLO_WORLD_FALLBACK)
}

/// Orchestration: one activity call with a fixed literal input; the
/// activity's result is the orchestration result.
pub async fn hello_orchestrator(ctx: OrchestrationContext) -> anyhow::Result<String> {
    Ok(ctx.call_activity("hello", "Seoul").await?)
}

/// Activity: wrap the input in a greeting.
pub async fn hello_activity(name: String) -> anyhow::Result<String> {
    Ok(format!("Hello {name}!"))
}

/// Assemble the function table served by the host binary.
pub fn greeting_app() -> FunctionApp {
    FunctionApp::new()
        .http_trigger("hello_world", &[Method::GET, Method::POST], hello_world)
        .http_trigger(
            "container_hello_world",
            &[Method::GET, Method::POST],
            container_hello_world,
        )
        .orchestration_trigger("hello_orchestrator", hello_orchestrator)
        .activity_trigger("hello", hello_activity)
}
