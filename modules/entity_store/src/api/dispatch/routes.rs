//! Route table: (verb, path shape) -> operation

use super::dto::*;
use super::request::{Request, Verb};
use crate::contract::{ExecutionStatus, StoreError};
use crate::domain::{Operation, DEFAULT_EXECUTION_LIMIT};
use serde::de::DeserializeOwned;

/// Decode a request into an operation.
///
/// Unknown (verb, path) pairs yield `RouteNotFound`; malformed bodies and
/// query parameters yield `InvalidArgument`.
pub fn decode(request: &Request) -> Result<Operation, StoreError> {
    let segments = request.segments();
    let path: Vec<&str> = segments.iter().map(String::as_str).collect();

    // READ on a collection behaves as LIST
    let listing = matches!(request.verb, Verb::List | Verb::Read);

    let operation = match (request.verb, path.as_slice()) {
        (Verb::Create, ["init"] | ["initialize"]) => Operation::Initialize,

        // ===== Application catalog =====
        (Verb::Create, ["apps"]) => {
            let body: CreateAppRequest = body(request)?;
            Operation::CreateApp(body.into_new_app(request.caller.as_deref()))
        }
        (_, ["apps"]) if listing => Operation::ListApps {
            owner_id: query(request, &["userId", "user_id", "createdBy", "created_by"])
                .or(request.caller.as_deref())
                .unwrap_or_default()
                .to_string(),
        },
        (Verb::Read, ["apps", id]) => Operation::GetApp { id: id.to_string() },
        (Verb::Update, ["apps", id]) => {
            let body: UpdateAppRequest = body_or_default(request)?;
            Operation::UpdateApp {
                id: id.to_string(),
                patch: body.try_into()?,
            }
        }
        (Verb::Delete, ["apps", id]) => Operation::DeleteApp { id: id.to_string() },
        (Verb::Create, ["apps", id, "data"]) => {
            let body: SaveAppDataRequest = body(request)?;
            Operation::SaveAppData {
                app_id: id.to_string(),
                content: body.content_text(),
                data_type: body.data_type,
            }
        }
        (_, ["apps", id, "data"]) if listing => Operation::ListAppData {
            app_id: id.to_string(),
            data_type: query(request, &["type", "dataType", "data_type"]).map(str::to_string),
        },
        (Verb::Create, ["apps", id, "executions"]) => {
            let body: RecordExecutionRequest = body(request)?;
            let status = body
                .status
                .parse::<ExecutionStatus>()
                .map_err(StoreError::invalid)?;
            Operation::RecordExecution {
                app_id: id.to_string(),
                result: body.execution_result,
                time_ms: body.execution_time,
                status,
            }
        }
        (_, ["apps", id, "executions"]) if listing => Operation::ListExecutions {
            app_id: id.to_string(),
            limit: execution_limit(request)?,
        },

        // ===== Commerce =====
        (Verb::Create, ["users"]) => Operation::CreateUser(body::<CreateUserRequest>(request)?.into()),
        (_, ["users"]) if listing => Operation::ListUsers,
        (Verb::Read, ["users", id]) => Operation::GetUser {
            id: numeric_id("user", id)?,
        },
        (Verb::Create, ["products"]) => {
            Operation::CreateProduct(body::<CreateProductRequest>(request)?.into())
        }
        (_, ["products"]) if listing => Operation::ListProducts,
        (Verb::Read, ["products", id]) => Operation::GetProduct {
            id: numeric_id("product", id)?,
        },
        (Verb::Create, ["orders"]) => {
            Operation::CreateOrder(body::<CreateOrderRequest>(request)?.into())
        }
        (_, ["orders"]) if listing => Operation::ListOrders {
            user_id: query(request, &["userId", "user_id"])
                .map(|raw| numeric_id("user", raw))
                .transpose()?,
        },

        _ => {
            return Err(StoreError::RouteNotFound {
                verb: request.verb.to_string(),
                path: request.path(),
            })
        }
    };

    Ok(operation)
}

fn body<T: DeserializeOwned>(request: &Request) -> Result<T, StoreError> {
    let body = request
        .body
        .clone()
        .ok_or_else(|| StoreError::invalid("request body is required"))?;

    serde_json::from_value(body)
        .map_err(|e| StoreError::invalid(format!("malformed request body: {}", e)))
}

fn body_or_default<T: DeserializeOwned + Default>(request: &Request) -> Result<T, StoreError> {
    match &request.body {
        None | Some(serde_json::Value::Null) => Ok(T::default()),
        Some(_) => body(request),
    }
}

/// First present query parameter among `keys`
fn query<'a>(request: &'a Request, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| request.query.get(*key))
        .map(String::as_str)
}

fn execution_limit(request: &Request) -> Result<u64, StoreError> {
    let Some(raw) = query(request, &["limit"]) else {
        return Ok(DEFAULT_EXECUTION_LIMIT);
    };

    match raw.trim().parse::<u64>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(StoreError::invalid(format!(
            "limit must be a positive integer (got '{}')",
            raw
        ))),
    }
}

fn numeric_id(resource: &str, raw: &str) -> Result<i32, StoreError> {
    raw.trim().parse::<i32>().map_err(|_| {
        StoreError::invalid(format!("{} id must be an integer (got '{}')", resource, raw))
    })
}
