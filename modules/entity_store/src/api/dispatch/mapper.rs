//! Conversions between wire DTOs, contract models and operation outcomes

use super::dto::*;
use crate::contract::{self, StoreError};
use crate::domain::Outcome;
use serde::Serialize;

// ===== Contract -> DTO =====

impl From<contract::App> for AppDto {
    fn from(app: contract::App) -> Self {
        Self {
            id: app.id,
            name: app.name,
            description: app.description,
            prompt: app.prompt,
            created_by: app.created_by,
            created_at: app.created_at,
            updated_at: app.updated_at,
            is_published: app.is_published,
            config: app.config,
        }
    }
}

impl From<contract::AppDataRecord> for AppDataDto {
    fn from(record: contract::AppDataRecord) -> Self {
        Self {
            id: record.id,
            app_id: record.app_id,
            data_type: record.data_type,
            content: record.content,
            created_at: record.created_at,
        }
    }
}

impl From<contract::AppExecution> for ExecutionDto {
    fn from(execution: contract::AppExecution) -> Self {
        Self {
            id: execution.id,
            app_id: execution.app_id,
            execution_result: execution.execution_result,
            execution_time: execution.execution_time,
            status: execution.status.to_string(),
            created_at: execution.created_at,
        }
    }
}

impl From<contract::User> for UserDto {
    fn from(user: contract::User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

impl From<contract::Product> for ProductDto {
    fn from(product: contract::Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            created_at: product.created_at,
        }
    }
}

impl From<contract::Order> for OrderDto {
    fn from(order: contract::Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            product_id: order.product_id,
            quantity: order.quantity,
            total_price: order.total_price,
            status: order.status,
            created_at: order.created_at,
        }
    }
}

impl From<contract::OrderDetails> for OrderDetailsDto {
    fn from(details: contract::OrderDetails) -> Self {
        Self {
            order: details.order.into(),
            user_name: details.user_name,
            product_name: details.product_name,
            product_price: details.product_price,
        }
    }
}

// ===== Request -> Contract =====

impl CreateAppRequest {
    pub fn into_new_app(self, caller: Option<&str>) -> contract::NewApp {
        contract::NewApp {
            created_by: self
                .created_by
                .or_else(|| caller.map(str::to_string))
                .unwrap_or_default(),
            id: self.id,
            name: self.name,
            description: self.description,
            prompt: self.prompt,
            config: self.config,
        }
    }
}

impl TryFrom<UpdateAppRequest> for contract::AppPatch {
    type Error = StoreError;

    fn try_from(req: UpdateAppRequest) -> Result<Self, Self::Error> {
        let is_published = req
            .is_published
            .map(|flag| {
                flag.as_bool()
                    .ok_or_else(|| StoreError::invalid("is_published must be a boolean, 0 or 1"))
            })
            .transpose()?;

        Ok(Self {
            name: req.name,
            description: req.description,
            prompt: req.prompt,
            is_published,
            config: req.config,
        })
    }
}

impl SaveAppDataRequest {
    /// Payload text as stored
    pub fn content_text(&self) -> String {
        match &self.content {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl From<CreateUserRequest> for contract::NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
        }
    }
}

impl From<CreateProductRequest> for contract::NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
            stock: req.stock,
        }
    }
}

impl From<CreateOrderRequest> for contract::NewOrder {
    fn from(req: CreateOrderRequest) -> Self {
        Self {
            user_id: req.user_id,
            product_id: req.product_id,
            quantity: req.quantity,
            status: req.status,
        }
    }
}

// ===== Outcome -> JSON =====

/// Encode an operation result as the envelope's `data` payload
pub fn outcome_to_json(outcome: Outcome) -> Result<serde_json::Value, StoreError> {
    match outcome {
        Outcome::Initialized { family } => to_json(InitializedDto {
            message: "Database initialized".to_string(),
            family: family.to_string(),
        }),
        Outcome::AppCreated { id }
        | Outcome::DataSaved { id }
        | Outcome::ExecutionRecorded { id } => to_json(CreatedDto { id }),
        Outcome::App(app) => to_json(AppDto::from(app)),
        Outcome::Apps(apps) => to_json(collect::<_, AppDto>(apps)),
        Outcome::AppDeleted { id, existed } => to_json(DeletedDto {
            id,
            deleted: existed,
        }),
        Outcome::AppData(records) => to_json(collect::<_, AppDataDto>(records)),
        Outcome::Executions(executions) => to_json(collect::<_, ExecutionDto>(executions)),
        Outcome::User(user) => to_json(UserDto::from(user)),
        Outcome::Users(users) => to_json(collect::<_, UserDto>(users)),
        Outcome::Product(product) => to_json(ProductDto::from(product)),
        Outcome::Products(products) => to_json(collect::<_, ProductDto>(products)),
        Outcome::Order(order) => to_json(OrderDto::from(order)),
        Outcome::Orders(orders) => to_json(collect::<_, OrderDetailsDto>(orders)),
    }
}

fn collect<T, D: From<T>>(items: Vec<T>) -> Vec<D> {
    items.into_iter().map(D::from).collect()
}

fn to_json<T: Serialize>(value: T) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(value).map_err(|e| {
        tracing::error!(error = %e, "Failed to encode response payload");
        StoreError::internal("failed to encode response payload")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_published_accepts_integers_zero_and_one() {
        let req: UpdateAppRequest = serde_json::from_str(r#"{"is_published": 1}"#).unwrap();
        let patch = contract::AppPatch::try_from(req).unwrap();
        assert_eq!(patch.is_published, Some(true));

        let req: UpdateAppRequest = serde_json::from_str(r#"{"isPublished": false}"#).unwrap();
        assert_eq!(
            contract::AppPatch::try_from(req).unwrap().is_published,
            Some(false)
        );

        let req: UpdateAppRequest = serde_json::from_str(r#"{"is_published": 7}"#).unwrap();
        assert!(contract::AppPatch::try_from(req).is_err());
    }

    #[test]
    fn structured_content_is_stored_serialized() {
        let req: SaveAppDataRequest =
            serde_json::from_str(r#"{"dataType":"user_input","content":{"q":"hi"}}"#).unwrap();
        assert_eq!(req.content_text(), r#"{"q":"hi"}"#);

        let req: SaveAppDataRequest =
            serde_json::from_str(r#"{"data_type":"note","content":"plain"}"#).unwrap();
        assert_eq!(req.content_text(), "plain");
    }

    #[test]
    fn null_description_clears_and_absent_keeps() {
        let req: UpdateAppRequest = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(
            contract::AppPatch::try_from(req).unwrap().description,
            Some(None)
        );

        let req: UpdateAppRequest = serde_json::from_str(r#"{"description": "new"}"#).unwrap();
        assert_eq!(
            contract::AppPatch::try_from(req).unwrap().description,
            Some(Some("new".to_string()))
        );

        let req: UpdateAppRequest = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        assert_eq!(contract::AppPatch::try_from(req).unwrap().description, None);
    }
}
