//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{app_data, app_execution, order, product, prompt_app, user};
use crate::contract::{
    App, AppDataRecord, AppExecution, ExecutionStatus, NewApp, Order, OrderDetails, Product,
    User,
};
use anyhow::Context;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::{NotSet, Set};
use std::str::FromStr;

// ===== App Conversions =====

impl TryFrom<prompt_app::Model> for App {
    type Error = anyhow::Error;

    fn try_from(entity: prompt_app::Model) -> Result<Self, Self::Error> {
        let config = entity
            .config
            .as_deref()
            .map(serde_json::from_str::<serde_json::Value>)
            .transpose()
            .with_context(|| format!("app {} has malformed config", entity.id))?;

        Ok(Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            prompt: entity.prompt,
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            is_published: entity.is_published,
            config,
        })
    }
}

/// Active model for inserting a new app stamped with `now`
pub fn new_app_active(app: &NewApp, now: DateTime<Utc>) -> prompt_app::ActiveModel {
    prompt_app::ActiveModel {
        id: Set(app.id.clone()),
        name: Set(app.name.clone()),
        description: Set(app.description.clone()),
        prompt: Set(app.prompt.clone()),
        created_by: Set(app.created_by.clone()),
        created_at: Set(now),
        updated_at: Set(now),
        is_published: Set(false),
        config: Set(app.config.as_ref().map(|c| c.to_string())),
    }
}

// ===== App Data Conversions =====

impl From<app_data::Model> for AppDataRecord {
    fn from(entity: app_data::Model) -> Self {
        Self {
            id: entity.id,
            app_id: entity.app_id,
            data_type: entity.data_type,
            content: entity.content,
            created_at: entity.created_at,
        }
    }
}

impl From<&AppDataRecord> for app_data::ActiveModel {
    fn from(record: &AppDataRecord) -> Self {
        Self {
            id: Set(record.id.clone()),
            app_id: Set(record.app_id.clone()),
            data_type: Set(record.data_type.clone()),
            content: Set(record.content.clone()),
            created_at: Set(record.created_at),
        }
    }
}

// ===== Execution Conversions =====

impl TryFrom<app_execution::Model> for AppExecution {
    type Error = anyhow::Error;

    fn try_from(entity: app_execution::Model) -> Result<Self, Self::Error> {
        let status = entity
            .status
            .parse::<ExecutionStatus>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("execution {} has unknown status", entity.id))?;
        let execution_time = u64::try_from(entity.execution_time)
            .with_context(|| format!("execution {} has negative duration", entity.id))?;

        Ok(Self {
            id: entity.id,
            app_id: entity.app_id,
            execution_result: entity.execution_result,
            execution_time,
            status,
            created_at: entity.created_at,
        })
    }
}

impl From<&AppExecution> for app_execution::ActiveModel {
    fn from(execution: &AppExecution) -> Self {
        Self {
            id: Set(execution.id.clone()),
            app_id: Set(execution.app_id.clone()),
            execution_result: Set(execution.execution_result.clone()),
            // durations are bounded by the i64 range checked at validation
            execution_time: Set(i64::try_from(execution.execution_time).unwrap_or(i64::MAX)),
            status: Set(execution.status.as_str().to_string()),
            created_at: Set(execution.created_at),
        }
    }
}

// ===== Commerce Conversions =====

impl From<user::Model> for User {
    fn from(entity: user::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            created_at: entity.created_at,
        }
    }
}

pub fn new_user_active(name: &str, email: &str, now: DateTime<Utc>) -> user::ActiveModel {
    user::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        created_at: Set(now),
    }
}

impl TryFrom<product::Model> for Product {
    type Error = anyhow::Error;

    fn try_from(entity: product::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            price: parse_decimal(&entity.price, "product price")?,
            id: entity.id,
            name: entity.name,
            description: entity.description,
            stock: entity.stock,
            created_at: entity.created_at,
        })
    }
}

pub fn new_product_active(
    name: &str,
    description: Option<&str>,
    price: Decimal,
    stock: i32,
    now: DateTime<Utc>,
) -> product::ActiveModel {
    product::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(description.map(str::to_string)),
        price: Set(price.normalize().to_string()),
        stock: Set(stock),
        created_at: Set(now),
    }
}

impl TryFrom<order::Model> for Order {
    type Error = anyhow::Error;

    fn try_from(entity: order::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            total_price: parse_decimal(&entity.total_price, "order total")?,
            id: entity.id,
            user_id: entity.user_id,
            product_id: entity.product_id,
            quantity: entity.quantity,
            status: entity.status,
            created_at: entity.created_at,
        })
    }
}

impl TryFrom<order::DetailsRow> for OrderDetails {
    type Error = anyhow::Error;

    fn try_from(row: order::DetailsRow) -> Result<Self, Self::Error> {
        Ok(Self {
            product_price: parse_decimal(&row.product_price, "product price")?,
            order: Order {
                total_price: parse_decimal(&row.total_price, "order total")?,
                id: row.id,
                user_id: row.user_id,
                product_id: row.product_id,
                quantity: row.quantity,
                status: row.status,
                created_at: row.created_at,
            },
            user_name: row.user_name,
            product_name: row.product_name,
        })
    }
}

fn parse_decimal(raw: &str, what: &str) -> anyhow::Result<Decimal> {
    Decimal::from_str(raw).with_context(|| format!("malformed {}: '{}'", what, raw))
}
