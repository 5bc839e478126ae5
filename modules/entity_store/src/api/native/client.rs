//! Native client implementation - typed operations for in-process calls

use crate::api::dispatch::Dispatcher;
use crate::contract::{
    App, AppDataRecord, AppExecution, AppPatch, ExecutionStatus, NewApp, NewOrder, NewProduct,
    NewUser, Order, OrderDetails, Product, StoreClient, StoreError, User,
};
use crate::domain::{Operation, Outcome};
use async_trait::async_trait;

/// Native client that submits typed operations straight to the partition
/// gates, skipping request decoding and envelope encoding.
#[derive(Clone)]
pub struct NativeClient {
    dispatcher: Dispatcher,
}

impl NativeClient {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    async fn run(&self, partition: &str, operation: Operation) -> Result<Outcome, StoreError> {
        self.dispatcher.execute(partition, operation).await
    }
}

fn unexpected(outcome: Outcome) -> StoreError {
    tracing::error!(?outcome, "Operation produced an unexpected outcome");
    StoreError::internal("unexpected operation outcome")
}

#[async_trait]
impl StoreClient for NativeClient {
    async fn initialize(&self, partition: &str) -> Result<(), StoreError> {
        match self.run(partition, Operation::Initialize).await? {
            Outcome::Initialized { .. } => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    async fn create_app(&self, partition: &str, app: NewApp) -> Result<String, StoreError> {
        match self.run(partition, Operation::CreateApp(app)).await? {
            Outcome::AppCreated { id } => Ok(id),
            other => Err(unexpected(other)),
        }
    }

    async fn get_app(&self, partition: &str, id: &str) -> Result<App, StoreError> {
        let op = Operation::GetApp { id: id.to_string() };
        match self.run(partition, op).await? {
            Outcome::App(app) => Ok(app),
            other => Err(unexpected(other)),
        }
    }

    async fn list_apps(&self, partition: &str, owner_id: &str) -> Result<Vec<App>, StoreError> {
        let op = Operation::ListApps {
            owner_id: owner_id.to_string(),
        };
        match self.run(partition, op).await? {
            Outcome::Apps(apps) => Ok(apps),
            other => Err(unexpected(other)),
        }
    }

    async fn update_app(
        &self,
        partition: &str,
        id: &str,
        patch: AppPatch,
    ) -> Result<App, StoreError> {
        let op = Operation::UpdateApp {
            id: id.to_string(),
            patch,
        };
        match self.run(partition, op).await? {
            Outcome::App(app) => Ok(app),
            other => Err(unexpected(other)),
        }
    }

    async fn delete_app(&self, partition: &str, id: &str) -> Result<bool, StoreError> {
        let op = Operation::DeleteApp { id: id.to_string() };
        match self.run(partition, op).await? {
            Outcome::AppDeleted { existed, .. } => Ok(existed),
            other => Err(unexpected(other)),
        }
    }

    async fn save_app_data(
        &self,
        partition: &str,
        app_id: &str,
        data_type: &str,
        content: String,
    ) -> Result<String, StoreError> {
        let op = Operation::SaveAppData {
            app_id: app_id.to_string(),
            data_type: data_type.to_string(),
            content,
        };
        match self.run(partition, op).await? {
            Outcome::DataSaved { id } => Ok(id),
            other => Err(unexpected(other)),
        }
    }

    async fn list_app_data(
        &self,
        partition: &str,
        app_id: &str,
        data_type: Option<&str>,
    ) -> Result<Vec<AppDataRecord>, StoreError> {
        let op = Operation::ListAppData {
            app_id: app_id.to_string(),
            data_type: data_type.map(str::to_string),
        };
        match self.run(partition, op).await? {
            Outcome::AppData(records) => Ok(records),
            other => Err(unexpected(other)),
        }
    }

    async fn record_execution(
        &self,
        partition: &str,
        app_id: &str,
        result: &str,
        time_ms: i64,
        status: ExecutionStatus,
    ) -> Result<String, StoreError> {
        let op = Operation::RecordExecution {
            app_id: app_id.to_string(),
            result: result.to_string(),
            time_ms,
            status,
        };
        match self.run(partition, op).await? {
            Outcome::ExecutionRecorded { id } => Ok(id),
            other => Err(unexpected(other)),
        }
    }

    async fn list_executions(
        &self,
        partition: &str,
        app_id: &str,
        limit: u64,
    ) -> Result<Vec<AppExecution>, StoreError> {
        let op = Operation::ListExecutions {
            app_id: app_id.to_string(),
            limit,
        };
        match self.run(partition, op).await? {
            Outcome::Executions(executions) => Ok(executions),
            other => Err(unexpected(other)),
        }
    }

    async fn create_user(&self, partition: &str, user: NewUser) -> Result<User, StoreError> {
        match self.run(partition, Operation::CreateUser(user)).await? {
            Outcome::User(user) => Ok(user),
            other => Err(unexpected(other)),
        }
    }

    async fn get_user(&self, partition: &str, id: i32) -> Result<User, StoreError> {
        match self.run(partition, Operation::GetUser { id }).await? {
            Outcome::User(user) => Ok(user),
            other => Err(unexpected(other)),
        }
    }

    async fn list_users(&self, partition: &str) -> Result<Vec<User>, StoreError> {
        match self.run(partition, Operation::ListUsers).await? {
            Outcome::Users(users) => Ok(users),
            other => Err(unexpected(other)),
        }
    }

    async fn create_product(
        &self,
        partition: &str,
        product: NewProduct,
    ) -> Result<Product, StoreError> {
        match self.run(partition, Operation::CreateProduct(product)).await? {
            Outcome::Product(product) => Ok(product),
            other => Err(unexpected(other)),
        }
    }

    async fn get_product(&self, partition: &str, id: i32) -> Result<Product, StoreError> {
        match self.run(partition, Operation::GetProduct { id }).await? {
            Outcome::Product(product) => Ok(product),
            other => Err(unexpected(other)),
        }
    }

    async fn list_products(&self, partition: &str) -> Result<Vec<Product>, StoreError> {
        match self.run(partition, Operation::ListProducts).await? {
            Outcome::Products(products) => Ok(products),
            other => Err(unexpected(other)),
        }
    }

    async fn create_order(&self, partition: &str, order: NewOrder) -> Result<Order, StoreError> {
        match self.run(partition, Operation::CreateOrder(order)).await? {
            Outcome::Order(order) => Ok(order),
            other => Err(unexpected(other)),
        }
    }

    async fn list_orders(
        &self,
        partition: &str,
        user_id: Option<i32>,
    ) -> Result<Vec<OrderDetails>, StoreError> {
        match self.run(partition, Operation::ListOrders { user_id }).await? {
            Outcome::Orders(orders) => Ok(orders),
            other => Err(unexpected(other)),
        }
    }
}
