//! Route registration

use super::{error::EnvelopeResponse, handlers};
use crate::api::dispatch::Dispatcher;
use axum::{
    body::Bytes,
    extract::{Path, Query},
    http::{HeaderMap, Method},
    routing::any,
    Extension, Router,
};
use std::collections::HashMap;

/// Mount the store routes:
///
/// - `/api/db/{*path}` - default partition
/// - `/api/partitions/{partition}/{*path}` - named partition
pub fn register_routes(router: Router, dispatcher: Dispatcher) -> Router {
    router
        .route("/api/db/{*path}", any(default_partition_handler))
        .route(
            "/api/partitions/{partition}/{*path}",
            any(named_partition_handler),
        )
        .layer(Extension(dispatcher))
}

// ===== Handler wrappers that extract the dispatcher from Extension =====

async fn default_partition_handler(
    Extension(dispatcher): Extension<Dispatcher>,
    method: Method,
    Path(path): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> EnvelopeResponse {
    handlers::forward(&dispatcher, None, method, &path, query, &headers, body).await
}

async fn named_partition_handler(
    Extension(dispatcher): Extension<Dispatcher>,
    method: Method,
    Path((partition, path)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> EnvelopeResponse {
    handlers::forward(
        &dispatcher,
        Some(&partition),
        method,
        &path,
        query,
        &headers,
        body,
    )
    .await
}
