//! End-to-end tests against a live function host.

use std::{sync::Arc, time::Duration};

use hail::{DurableClient, FunctionHost, greeting_app};
use tokio::time::sleep;

const POLL_INTERVAL: Duration = Duration::from_millis(25);
const POLL_ATTEMPTS: usize = 200;

async fn start_host() -> FunctionHost {
    let app = Arc::new(greeting_app());
    let client = DurableClient::in_process(Arc::clone(&app));
    FunctionHost::start("127.0.0.1:0".parse().expect("loopback addr"), app, client)
        .await
        .expect("function host starts")
}

#[tokio::test]
async fn greeting_routes_respond_over_the_wire() {
    let host = start_host().await;
    let base = format!("http://{}", host.addr());
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{base}/hello_world?name=Ada"))
        .send()
        .await
        .expect("hello_world response");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.expect("hello_world body"), "Hello, Ada!");

    let response = client
        .post(format!("{base}/container_hello_world"))
        .body("not json")
        .send()
        .await
        .expect("container_hello_world response");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.expect("container_hello_world body");
    assert!(body.starts_with("This HTTP triggered function executed successfully."));

    let response = client
        .post(format!("{base}/hello_world"))
        .body(r#"{"name": "Bob"}"#)
        .send()
        .await
        .expect("hello_world body response");
    assert_eq!(response.text().await.expect("greeting body"), "Hello, Bob!");

    host.shutdown().await;
}

#[tokio::test]
async fn orchestration_completes_and_reports_its_result() {
    let host = start_host().await;
    let base = format!("http://{}", host.addr());
    let client = reqwest::Client::new();

    let accepted = client
        .post(format!("{base}/orchestrators/hello_orchestrator"))
        .send()
        .await
        .expect("start response");
    assert_eq!(accepted.status(), reqwest::StatusCode::ACCEPTED);

    let reference: serde_json::Value = accepted.json().await.expect("status reference json");
    let status_uri = reference["status_query_get_uri"]
        .as_str()
        .expect("status uri")
        .to_string();
    assert!(!status_uri.is_empty());

    let mut snapshot = serde_json::Value::Null;
    for _ in 0..POLL_ATTEMPTS {
        snapshot = client
            .get(format!("{base}{status_uri}"))
            .send()
            .await
            .expect("status response")
            .json()
            .await
            .expect("status json");
        match snapshot["runtime_status"].as_str() {
            Some("completed") | Some("failed") => break,
            _ => sleep(POLL_INTERVAL).await,
        }
    }

    assert_eq!(
        snapshot["runtime_status"].as_str(),
        Some("completed"),
        "instance state: {snapshot}"
    );
    assert_eq!(snapshot["output"].as_str(), Some("Hello Seoul!"));

    host.shutdown().await;
}
