//! REST adapter: method mapping, caller header and status codes

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use common::memory_module;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router() -> Router {
    memory_module().register_rest(Router::new())
}

async fn call(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
    caller: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(caller) = caller {
        builder = builder.header("x-user-id", caller);
    }
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(Body::from(body.unwrap_or_default().to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn app_routes_on_default_partition() {
    let router = router();

    let (status, body) = call(
        &router,
        "POST",
        "/api/db/apps",
        Some(r#"{"id":"a1","name":"Demo","prompt":"p"}"#),
        Some("u1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true, "data": {"id": "a1"}}));

    let (status, body) = call(&router, "GET", "/api/db/apps", None, Some("u1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], "a1");

    let (status, body) = call(
        &router,
        "PATCH",
        "/api/db/apps/a1",
        Some(r#"{"isPublished":true,"name":"Renamed"}"#),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Renamed");

    let (status, body) = call(&router, "DELETE", "/api/db/apps/a1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deleted"], true);

    let (status, body) = call(&router, "GET", "/api/db/apps/a1", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"]["kind"], "NotFound");
}

#[tokio::test]
async fn error_statuses() {
    let router = router();

    let (status, body) = call(&router, "POST", "/api/db/apps", Some("{not json"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], "InvalidArgument");

    let (status, body) = call(&router, "GET", "/api/db/nowhere", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["kind"], "RouteNotFound");

    call(
        &router,
        "POST",
        "/api/db/apps",
        Some(r#"{"id":"a1","name":"Demo","prompt":"p","created_by":"u1"}"#),
        None,
    )
    .await;
    let (status, body) = call(
        &router,
        "POST",
        "/api/db/apps",
        Some(r#"{"id":"a1","name":"Again","prompt":"p","created_by":"u1"}"#),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["kind"], "Conflict");
}

#[tokio::test]
async fn named_partition_serves_commerce() {
    let router = router();

    call(&router, "POST", "/api/partitions/shop/init", None, None).await;
    let (_, user) = call(
        &router,
        "POST",
        "/api/partitions/shop/users",
        Some(r#"{"name":"Ada","email":"ada@example.com"}"#),
        None,
    )
    .await;
    let (_, product) = call(
        &router,
        "POST",
        "/api/partitions/shop/products",
        Some(r#"{"name":"Widget","price":"4.20","stock":1}"#),
        None,
    )
    .await;

    let order = json!({
        "userId": user["data"]["id"],
        "productId": product["data"]["id"],
        "quantity": 1
    })
    .to_string();
    let (status, _) = call(&router, "POST", "/api/partitions/shop/orders", Some(&order), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) =
        call(&router, "POST", "/api/partitions/shop/orders", Some(&order), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["kind"], "FailedPrecondition");

    let (status, body) = call(&router, "GET", "/api/partitions/shop/orders", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["total_price"], 4.2);

    let (status, _) = call(&router, "GET", "/api/partitions/shop/apps/a1", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
