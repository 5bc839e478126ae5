//! Native client trait for in-process callers
//!
//! Other modules use this trait to reach a partition without going through
//! the opaque request/response dispatcher.

use super::{
    error::StoreError,
    model::{
        data_type, App, AppDataRecord, AppExecution, AppPatch, ExecutionStatus, NewApp, NewOrder,
        NewProduct, NewUser, Order, OrderDetails, PerformanceMetric, Product, User, UserInput,
    },
};
use async_trait::async_trait;

/// Entity store API for in-process communication
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Materialize the partition's schema
    async fn initialize(&self, partition: &str) -> Result<(), StoreError>;

    // ===== Application catalog =====

    /// Create an app, returning its id
    async fn create_app(&self, partition: &str, app: NewApp) -> Result<String, StoreError>;

    async fn get_app(&self, partition: &str, id: &str) -> Result<App, StoreError>;

    /// Apps owned by `owner_id`, newest first
    async fn list_apps(&self, partition: &str, owner_id: &str) -> Result<Vec<App>, StoreError>;

    async fn update_app(
        &self,
        partition: &str,
        id: &str,
        patch: AppPatch,
    ) -> Result<App, StoreError>;

    /// Delete an app with its data and executions; returns whether it existed
    async fn delete_app(&self, partition: &str, id: &str) -> Result<bool, StoreError>;

    /// Store a data blob, returning the generated record id
    async fn save_app_data(
        &self,
        partition: &str,
        app_id: &str,
        data_type: &str,
        content: String,
    ) -> Result<String, StoreError>;

    async fn list_app_data(
        &self,
        partition: &str,
        app_id: &str,
        data_type: Option<&str>,
    ) -> Result<Vec<AppDataRecord>, StoreError>;

    /// Record an execution, returning the generated id
    async fn record_execution(
        &self,
        partition: &str,
        app_id: &str,
        result: &str,
        time_ms: i64,
        status: ExecutionStatus,
    ) -> Result<String, StoreError>;

    async fn list_executions(
        &self,
        partition: &str,
        app_id: &str,
        limit: u64,
    ) -> Result<Vec<AppExecution>, StoreError>;

    // ===== Commerce =====

    async fn create_user(&self, partition: &str, user: NewUser) -> Result<User, StoreError>;

    async fn get_user(&self, partition: &str, id: i32) -> Result<User, StoreError>;

    /// All users, newest first
    async fn list_users(&self, partition: &str) -> Result<Vec<User>, StoreError>;

    async fn create_product(
        &self,
        partition: &str,
        product: NewProduct,
    ) -> Result<Product, StoreError>;

    async fn get_product(&self, partition: &str, id: i32) -> Result<Product, StoreError>;

    /// All products, newest first
    async fn list_products(&self, partition: &str) -> Result<Vec<Product>, StoreError>;

    async fn create_order(&self, partition: &str, order: NewOrder) -> Result<Order, StoreError>;

    async fn list_orders(
        &self,
        partition: &str,
        user_id: Option<i32>,
    ) -> Result<Vec<OrderDetails>, StoreError>;

    // ===== Convenience helpers =====

    /// Store a user input payload under [`data_type::USER_INPUT`]
    async fn save_user_input(
        &self,
        partition: &str,
        app_id: &str,
        input: &serde_json::Value,
    ) -> Result<String, StoreError> {
        self.save_app_data(partition, app_id, data_type::USER_INPUT, input.to_string())
            .await
    }

    /// Store a named metric under [`data_type::PERFORMANCE_METRIC`]
    async fn save_performance_metric(
        &self,
        partition: &str,
        app_id: &str,
        metric_name: &str,
        metric_value: f64,
    ) -> Result<String, StoreError> {
        let content = serde_json::json!({
            "metric_name": metric_name,
            "metric_value": metric_value,
        });
        self.save_app_data(
            partition,
            app_id,
            data_type::PERFORMANCE_METRIC,
            content.to_string(),
        )
        .await
    }

    /// User inputs of an app, newest first, with their JSON decoded
    async fn list_user_inputs(
        &self,
        partition: &str,
        app_id: &str,
    ) -> Result<Vec<UserInput>, StoreError> {
        let records = self
            .list_app_data(partition, app_id, Some(data_type::USER_INPUT))
            .await?;
        Ok(records.into_iter().map(UserInput::from).collect())
    }

    /// Performance metrics of an app, newest first.
    ///
    /// Records whose content is not a `{metric_name, metric_value}` object are skipped.
    async fn list_performance_metrics(
        &self,
        partition: &str,
        app_id: &str,
    ) -> Result<Vec<PerformanceMetric>, StoreError> {
        let records = self
            .list_app_data(partition, app_id, Some(data_type::PERFORMANCE_METRIC))
            .await?;
        Ok(records
            .into_iter()
            .filter_map(|record| {
                let id = record.id.clone();
                let metric = PerformanceMetric::from_record(record);
                if metric.is_none() {
                    tracing::warn!(record_id = %id, "Skipping undecodable performance metric");
                }
                metric
            })
            .collect())
    }

    /// Record one app run: its input, the execution and an `execution_time_ms` metric
    async fn save_app_run(
        &self,
        partition: &str,
        app_id: &str,
        input: &serde_json::Value,
        result: &str,
        time_ms: i64,
        status: ExecutionStatus,
    ) -> Result<String, StoreError> {
        self.save_user_input(partition, app_id, input).await?;
        let execution_id = self
            .record_execution(partition, app_id, result, time_ms, status)
            .await?;
        self.save_performance_metric(partition, app_id, "execution_time_ms", time_ms as f64)
            .await?;
        Ok(execution_id)
    }
}
