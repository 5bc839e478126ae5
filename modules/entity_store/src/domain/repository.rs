//! Repository traits for data access
//!
//! These traits define row-level operations only: no validation, no
//! existence checks, no id generation. Implementations are in
//! infra/storage/repositories.rs

use crate::contract::{
    App, AppDataRecord, AppExecution, AppPatch, NewApp, NewOrder, NewProduct, NewUser, Order,
    OrderDetails, Product, User,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Repository for the application catalog tables
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Insert a new app row stamped with `now`
    async fn insert_app(&self, app: &NewApp, now: DateTime<Utc>) -> Result<()>;

    /// Find an app by id
    async fn find_app(&self, id: &str) -> Result<Option<App>>;

    /// Apps owned by `owner_id`, newest first
    async fn list_apps_by_owner(&self, owner_id: &str) -> Result<Vec<App>>;

    /// Apply the provided fields and set `updated_at`; `None` if the app is absent
    async fn update_app(
        &self,
        id: &str,
        patch: &AppPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<App>>;

    /// Delete executions, then data records, then the app row.
    /// Returns whether the app row existed.
    async fn delete_app_cascade(&self, id: &str) -> Result<bool>;

    async fn insert_data(&self, record: &AppDataRecord) -> Result<()>;

    /// Data records of an app, optionally filtered by type, newest first
    async fn list_data(&self, app_id: &str, data_type: Option<&str>)
        -> Result<Vec<AppDataRecord>>;

    async fn insert_execution(&self, execution: &AppExecution) -> Result<()>;

    /// At most `limit` executions of an app, newest first
    async fn list_executions(&self, app_id: &str, limit: u64) -> Result<Vec<AppExecution>>;
}

/// Repository for the commerce tables
#[async_trait]
pub trait CommerceRepository: Send + Sync {
    async fn insert_user(&self, user: &NewUser, now: DateTime<Utc>) -> Result<User>;

    async fn find_user(&self, id: i32) -> Result<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// All users, newest first
    async fn list_users(&self) -> Result<Vec<User>>;

    async fn insert_product(&self, product: &NewProduct, now: DateTime<Utc>) -> Result<Product>;

    async fn find_product(&self, id: i32) -> Result<Option<Product>>;

    /// All products, newest first
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Insert the order row and take `order.quantity` off the product's stock
    /// as one unit of work.
    async fn place_order(
        &self,
        order: &NewOrder,
        total_price: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Order>;

    /// Orders joined with user and product, optionally for one user, newest first
    async fn list_order_details(&self, user_id: Option<i32>) -> Result<Vec<OrderDetails>>;
}
