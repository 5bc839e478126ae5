//! Wire shapes for request bodies and response payloads
//!
//! Request bodies use the web client's camelCase names and also accept
//! snake_case. Response rows keep the table's snake_case column names.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

// ===== Request bodies =====

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppRequest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub prompt: String,
    /// Falls back to the caller identity when absent
    #[serde(default, alias = "created_by")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub config: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppRequest {
    #[serde(default)]
    pub name: Option<String>,
    /// Absent leaves the description alone, `null` clears it
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default, alias = "is_published")]
    pub is_published: Option<Flag>,
    #[serde(default)]
    pub config: Option<serde_json::Value>,
}

/// Marks a field as present, keeping an explicit `null` as `Some(None)`
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Boolean accepted either as `true`/`false` or as `0`/`1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(b),
            Self::Int(0) => Some(false),
            Self::Int(1) => Some(true),
            Self::Int(_) => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAppDataRequest {
    #[serde(alias = "data_type")]
    pub data_type: String,
    /// A string is stored as-is; any other JSON value is stored serialized
    pub content: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordExecutionRequest {
    #[serde(alias = "execution_result")]
    pub execution_result: String,
    #[serde(alias = "execution_time")]
    pub execution_time: i64,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Number or decimal string
    pub price: Decimal,
    #[serde(default)]
    pub stock: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(alias = "user_id")]
    pub user_id: i32,
    #[serde(alias = "product_id")]
    pub product_id: i32,
    pub quantity: i32,
    #[serde(default)]
    pub status: Option<String>,
}

// ===== Response payloads =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub prompt: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_published: bool,
    pub config: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppDataDto {
    pub id: String,
    pub app_id: String,
    pub data_type: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionDto {
    pub id: String,
    pub app_id: String,
    pub execution_result: String,
    pub execution_time: u64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Order row with the joined user and product columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetailsDto {
    #[serde(flatten)]
    pub order: OrderDto,
    pub user_name: String,
    pub product_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub product_price: Decimal,
}

/// Id of a newly created row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedDto {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedDto {
    pub id: String,
    /// Whether a row was actually removed
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializedDto {
    pub message: String,
    pub family: String,
}
