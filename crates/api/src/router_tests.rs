//! In-process router tests via `tower::ServiceExt::oneshot` — no socket.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::WorkflowService;

use crate::router;

fn app() -> Router {
    router(Arc::new(WorkflowService::new()))
}

fn order_definition_json() -> Value {
    json!({
        "id": "order",
        "states": [
            { "id": "new",     "name": "New",     "enabled": true, "isInitial": true,  "isFinal": false },
            { "id": "shipped", "name": "Shipped", "enabled": true, "isInitial": false, "isFinal": false },
            { "id": "done",    "name": "Done",    "enabled": true, "isInitial": false, "isFinal": true }
        ],
        "actions": [
            { "id": "ship",     "name": "Ship",     "enabled": true, "fromStates": ["new"],     "toState": "shipped" },
            { "id": "complete", "name": "Complete", "enabled": true, "fromStates": ["shipped"], "toState": "done" }
        ]
    })
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn define_workflow_returns_created_with_camel_case_body() {
    let app = app();
    let response = app
        .oneshot(post_json("/workflows", order_definition_json()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body, order_definition_json());
}

#[tokio::test]
async fn invalid_definition_is_a_bad_request_with_message() {
    let mut def = order_definition_json();
    def["states"][1]["isInitial"] = json!(true); // two initial states

    let response = app().oneshot(post_json("/workflows", def)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "exactly one initial state is required (found 2)"
    );
}

#[tokio::test]
async fn unknown_workflow_is_not_found() {
    let response = app().oneshot(get("/workflows/ghost")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app()
        .oneshot(post_empty("/workflows/ghost/instances"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn full_order_scenario_over_http() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json("/workflows", order_definition_json()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Spawn.
    let response = app
        .clone()
        .oneshot(post_empty("/workflows/order/instances"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let instance = body_json(response).await;
    assert_eq!(instance["currentStateId"], "new");
    assert_eq!(instance["history"], json!([]));
    let id = instance["id"].as_str().unwrap().to_owned();

    // Ship, then complete.
    let response = app
        .clone()
        .oneshot(post_empty(&format!("/instances/{id}/actions/ship")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["currentStateId"], "shipped");

    let response = app
        .clone()
        .oneshot(post_empty(&format!("/instances/{id}/actions/complete")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["currentStateId"], "done");
    assert_eq!(body["history"][0]["actionId"], "ship");
    assert_eq!(body["history"][1]["actionId"], "complete");

    // Final state: further actions are rejected as invalid, not missing.
    let response = app
        .clone()
        .oneshot(post_empty(&format!("/instances/{id}/actions/ship")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "cannot perform actions on final state 'done'");

    // Unknown instance is 404.
    let response = app
        .oneshot(post_empty("/instances/ghost/actions/ship"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
