//! Contract models for the entity store
//!
//! These models are transport-agnostic and used by the domain, the storage
//! layer and in-process callers.
//! NO serde derives - wire shapes live in the api layer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Well-known `data_type` tags used by generated apps
pub mod data_type {
    /// Raw input a user submitted to an app
    pub const USER_INPUT: &str = "user_input";
    /// Named numeric measurement recorded by an app
    pub const PERFORMANCE_METRIC: &str = "performance_metric";
}

// ===== Application catalog =====

/// Generated application metadata
#[derive(Debug, Clone, PartialEq)]
pub struct App {
    /// Caller-supplied identifier (primary key)
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Prompt the app was generated from
    pub prompt: String,
    /// Owner identity
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_published: bool,
    /// Opaque structured configuration
    pub config: Option<serde_json::Value>,
}

/// Input for creating an app
#[derive(Debug, Clone, PartialEq)]
pub struct NewApp {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub prompt: String,
    pub created_by: String,
    pub config: Option<serde_json::Value>,
}

/// Partial update of an app; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppPatch {
    pub name: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
    pub prompt: Option<String>,
    pub is_published: Option<bool>,
    pub config: Option<serde_json::Value>,
}

/// Keyed data blob attached to an app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDataRecord {
    /// Derived from app id, data type and creation timestamp
    pub id: String,
    pub app_id: String,
    /// Free-form tag, see [`data_type`]
    pub data_type: String,
    /// Opaque serialized payload
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A decoded [`data_type::USER_INPUT`] record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    pub id: String,
    pub app_id: String,
    /// Stored content parsed as JSON; content that is not JSON comes back as a string
    pub input_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<AppDataRecord> for UserInput {
    fn from(record: AppDataRecord) -> Self {
        let input_data = serde_json::from_str(&record.content)
            .unwrap_or(serde_json::Value::String(record.content));
        Self {
            id: record.id,
            app_id: record.app_id,
            input_data,
            created_at: record.created_at,
        }
    }
}

/// A decoded [`data_type::PERFORMANCE_METRIC`] record
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetric {
    pub id: String,
    pub app_id: String,
    pub metric_name: String,
    pub metric_value: f64,
    pub created_at: DateTime<Utc>,
}

impl PerformanceMetric {
    /// Decode `{metric_name, metric_value}` content; `None` if it does not match
    pub fn from_record(record: AppDataRecord) -> Option<Self> {
        let content: serde_json::Value = serde_json::from_str(&record.content).ok()?;
        let metric_name = content.get("metric_name")?.as_str()?.to_string();
        let metric_value = content.get("metric_value")?.as_f64()?;
        Some(Self {
            id: record.id,
            app_id: record.app_id,
            metric_name,
            metric_value,
            created_at: record.created_at,
        })
    }
}

/// Outcome of one app run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppExecution {
    pub id: String,
    pub app_id: String,
    pub execution_result: String,
    /// Duration in milliseconds
    pub execution_time: u64,
    pub status: ExecutionStatus,
    pub created_at: DateTime<Utc>,
}

/// Execution status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    Success,
    Error,
    Pending,
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "pending" => Ok(Self::Pending),
            other => Err(format!(
                "status must be one of success, error, pending (got '{}')",
                other
            )),
        }
    }
}

// ===== Commerce =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    /// Unique across the partition
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    /// `price * quantity` captured when the order was placed
    pub total_price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    /// Defaults to [`Order::DEFAULT_STATUS`]
    pub status: Option<String>,
}

impl Order {
    pub const DEFAULT_STATUS: &'static str = "pending";
}

/// Order joined with its user and product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetails {
    pub order: Order,
    pub user_name: String,
    pub product_name: String,
    /// Current product price (the order keeps its own `total_price`)
    pub product_price: Decimal,
}
