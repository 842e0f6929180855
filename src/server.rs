//! HTTP gateway for registered functions.
//!
//! Mounts every registered HTTP trigger, the orchestration entry point, and
//! the status route backed by the injected [`DurableClient`]. Access is
//! anonymous; greeting handlers have no error branch, so the gateway only
//! answers 404/405 at the transport layer.

use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{MethodFilter, MethodRouter, get, post},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    app::{FunctionApp, HttpTrigger},
    durable::{DurableClient, InstanceId},
    request::FunctionRequest,
};

/// Gateway server handle.
pub struct FunctionHost {
    addr: SocketAddr,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

impl FunctionHost {
    /// Bind the gateway and start serving the registered functions.
    pub async fn start(
        addr: SocketAddr,
        app: Arc<FunctionApp>,
        client: DurableClient,
    ) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind function host listener on {addr}"))?;

        let actual_addr = listener.local_addr()?;
        let state = HostState { app, client };

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        // Spawn the server task
        tokio::spawn(run_server(listener, state, shutdown_rx));

        info!(addr = %actual_addr, "function host started");

        Ok(Self {
            addr: actual_addr,
            shutdown_tx,
        })
    }

    /// Get the address the gateway is bound to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Shutdown the gateway.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
    }
}

#[derive(Clone)]
struct HostState {
    app: Arc<FunctionApp>,
    client: DurableClient,
}

async fn run_server(
    listener: TcpListener,
    state: HostState,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) {
    let app = build_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        })
        .await
        .ok();
}

fn build_router(state: HostState) -> Router {
    let mut router = Router::new()
        .route("/orchestrators/{workflow_name}", post(start_orchestration))
        .route("/orchestrations/{instance_id}", get(orchestration_status))
        .route("/healthz", get(healthz));

    for trigger in state.app.http_triggers() {
        let path = format!("/{}", trigger.route);
        router = router.route(&path, http_trigger_router(trigger));
    }

    router.with_state(state)
}

fn http_trigger_router(trigger: &HttpTrigger) -> MethodRouter<HostState> {
    let mut method_router = MethodRouter::new();
    for method in &trigger.methods {
        let Some(filter) = method_filter(method) else {
            warn!(route = %trigger.route, method = %method, "unsupported method for http trigger");
            continue;
        };

        let route = trigger.route.clone();
        let handler = trigger.handler.clone();
        let call = move |method: Method,
                         Query(query): Query<HashMap<String, String>>,
                         body: Bytes| {
            let route = route.clone();
            let handler = handler.clone();
            async move {
                info!(route = %route, method = %method, "processing function request");
                handler(FunctionRequest::new(method, query, body)).await
            }
        };
        method_router = method_router.on(filter, call);
    }
    method_router
}

fn method_filter(method: &Method) -> Option<MethodFilter> {
    match method.as_str() {
        "GET" => Some(MethodFilter::GET),
        "POST" => Some(MethodFilter::POST),
        "PUT" => Some(MethodFilter::PUT),
        "DELETE" => Some(MethodFilter::DELETE),
        "PATCH" => Some(MethodFilter::PATCH),
        "HEAD" => Some(MethodFilter::HEAD),
        "OPTIONS" => Some(MethodFilter::OPTIONS),
        _ => None,
    }
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "hail",
    })
}

/// Status-check reference returned when an orchestration is started.
#[derive(Debug, Serialize)]
struct CheckStatusResponse {
    id: String,
    status_query_get_uri: String,
}

async fn start_orchestration(
    State(state): State<HostState>,
    Path(workflow_name): Path<String>,
) -> impl IntoResponse {
    let instance_id = state.client.start_new(&workflow_name);
    info!(orchestrator = %workflow_name, instance_id = %instance_id, "accepted orchestration start");

    (
        StatusCode::ACCEPTED,
        Json(CheckStatusResponse {
            id: instance_id.to_string(),
            status_query_get_uri: format!("/orchestrations/{instance_id}"),
        }),
    )
}

#[derive(Debug, Serialize)]
struct InstanceStatusResponse {
    instance_id: String,
    name: String,
    runtime_status: &'static str,
    output: Option<String>,
    error: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct ErrorResponseBody {
    message: String,
}

struct NotFound(String);

impl IntoResponse for NotFound {
    fn into_response(self) -> Response {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponseBody { message: self.0 }),
        )
            .into_response()
    }
}

async fn orchestration_status(
    State(state): State<HostState>,
    Path(instance_id): Path<String>,
) -> Result<Json<InstanceStatusResponse>, NotFound> {
    let id: InstanceId = instance_id
        .parse()
        .map_err(|_| NotFound(format!("unknown instance: {instance_id}")))?;
    let record = state
        .client
        .status(id)
        .ok_or_else(|| NotFound(format!("unknown instance: {instance_id}")))?;

    Ok(Json(InstanceStatusResponse {
        instance_id: record.id.to_string(),
        name: record.orchestrator,
        runtime_status: record.status.as_str(),
        output: record.output,
        error: record.error,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }))
}
