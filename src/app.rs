//! Function registration table.
//!
//! The table is code, not data: route and trigger identifiers map to handler
//! functions, and every part of the host (gateway, engine) resolves handlers
//! from the same table at runtime. Handlers are polymorphic only over their
//! trigger kind: HTTP, orchestration, or activity.

use std::{collections::HashMap, future::Future, sync::Arc};

use anyhow::Result;
use axum::http::Method;
use futures::future::BoxFuture;

use crate::durable::OrchestrationContext;
use crate::request::FunctionRequest;

/// Handler for an HTTP trigger. Total: always produces a response body.
pub type HttpHandlerFn = Arc<dyn Fn(FunctionRequest) -> BoxFuture<'static, String> + Send + Sync>;

/// Handler driving an orchestration instance to its result.
pub type OrchestratorFn =
    Arc<dyn Fn(OrchestrationContext) -> BoxFuture<'static, Result<String>> + Send + Sync>;

/// Handler for a single unit of work invoked from an orchestration.
pub type ActivityFn = Arc<dyn Fn(String) -> BoxFuture<'static, Result<String>> + Send + Sync>;

/// A registered HTTP route with its accepted methods.
#[derive(Clone)]
pub struct HttpTrigger {
    pub route: String,
    pub methods: Vec<Method>,
    pub handler: HttpHandlerFn,
}

/// Registration table for the three trigger kinds.
///
/// Registering an identifier twice replaces the earlier entry; lookups return
/// `None` for identifiers that were never registered.
#[derive(Default)]
pub struct FunctionApp {
    http: Vec<HttpTrigger>,
    orchestrators: HashMap<String, OrchestratorFn>,
    activities: HashMap<String, ActivityFn>,
}

impl FunctionApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an HTTP trigger at `route` for the given methods.
    pub fn http_trigger<F, Fut>(mut self, route: impl Into<String>, methods: &[Method], handler: F) -> Self
    where
        F: Fn(FunctionRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = String> + Send + 'static,
    {
        let trigger = HttpTrigger {
            route: route.into(),
            methods: methods.to_vec(),
            handler: Arc::new(move |req| Box::pin(handler(req))),
        };
        match self.http.iter().position(|t| t.route == trigger.route) {
            Some(existing) => self.http[existing] = trigger,
            None => self.http.push(trigger),
        }
        self
    }

    /// Register an orchestration trigger under `name`.
    pub fn orchestration_trigger<F, Fut>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(OrchestrationContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String>> + Send + 'static,
    {
        self.orchestrators
            .insert(name.into(), Arc::new(move |ctx| Box::pin(handler(ctx))));
        self
    }

    /// Register an activity trigger under `name`.
    pub fn activity_trigger<F, Fut>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String>> + Send + 'static,
    {
        self.activities
            .insert(name.into(), Arc::new(move |input| Box::pin(handler(input))));
        self
    }

    /// Iterate the registered HTTP triggers in registration order.
    pub fn http_triggers(&self) -> impl Iterator<Item = &HttpTrigger> {
        self.http.iter()
    }

    pub fn orchestrator(&self, name: &str) -> Option<OrchestratorFn> {
        self.orchestrators.get(name).cloned()
    }

    pub fn activity(&self, name: &str) -> Option<ActivityFn> {
        self.activities.get(name).cloned()
    }
}
