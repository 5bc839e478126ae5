//! HTTP request handlers - thin layer that builds a dispatch request

use super::error::EnvelopeResponse;
use crate::api::dispatch::{Dispatcher, Request, Verb};
use crate::contract::StoreError;
use axum::{body::Bytes, http::HeaderMap, http::Method};
use std::collections::HashMap;

/// Header carrying the already-authenticated caller id
pub const CALLER_HEADER: &str = "x-user-id";

/// Forward one HTTP call to a partition
pub async fn forward(
    dispatcher: &Dispatcher,
    partition: Option<&str>,
    method: Method,
    path: &str,
    query: HashMap<String, String>,
    headers: &HeaderMap,
    body: Bytes,
) -> EnvelopeResponse {
    let request = match build_request(method, path, query, headers, &body) {
        Ok(request) => request,
        Err(e) => return EnvelopeResponse::from_error(&e),
    };

    let envelope = match partition {
        Some(partition) => dispatcher.dispatch(partition, request).await,
        None => dispatcher.dispatch_default(request).await,
    };
    envelope.into()
}

fn build_request(
    method: Method,
    path: &str,
    query: HashMap<String, String>,
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<Request, StoreError> {
    let verb = verb_for(&method).ok_or_else(|| StoreError::RouteNotFound {
        verb: method.to_string(),
        path: path.to_string(),
    })?;

    let mut request = Request::new(verb, path);
    request.query = query;

    if !body.iter().all(u8::is_ascii_whitespace) {
        let value = serde_json::from_slice(body)
            .map_err(|e| StoreError::invalid(format!("invalid JSON body: {}", e)))?;
        request.body = Some(value);
    }

    if let Some(caller) = headers.get(CALLER_HEADER).and_then(|v| v.to_str().ok()) {
        if !caller.trim().is_empty() {
            request.caller = Some(caller.trim().to_string());
        }
    }

    Ok(request)
}

/// HTTP method to request verb
pub fn verb_for(method: &Method) -> Option<Verb> {
    match *method {
        Method::POST => Some(Verb::Create),
        Method::GET => Some(Verb::Read),
        Method::PUT | Method::PATCH => Some(Verb::Update),
        Method::DELETE => Some(Verb::Delete),
        _ => None,
    }
}
