//! Closed set of operations a partition executes, and their results

use crate::config::SchemaFamily;
use crate::contract::{
    App, AppDataRecord, AppExecution, AppPatch, ExecutionStatus, NewApp, NewOrder, NewProduct,
    NewUser, Order, OrderDetails, Product, User,
};

/// Default row cap for execution listings
pub const DEFAULT_EXECUTION_LIMIT: u64 = 10;

/// One unit of work admitted through a partition's gate
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Materialize the schema; valid for every family
    Initialize,

    // ===== Application catalog =====
    CreateApp(NewApp),
    GetApp { id: String },
    ListApps { owner_id: String },
    UpdateApp { id: String, patch: AppPatch },
    DeleteApp { id: String },
    SaveAppData {
        app_id: String,
        data_type: String,
        content: String,
    },
    ListAppData {
        app_id: String,
        data_type: Option<String>,
    },
    RecordExecution {
        app_id: String,
        result: String,
        time_ms: i64,
        status: ExecutionStatus,
    },
    ListExecutions { app_id: String, limit: u64 },

    // ===== Commerce =====
    CreateUser(NewUser),
    GetUser { id: i32 },
    ListUsers,
    CreateProduct(NewProduct),
    GetProduct { id: i32 },
    ListProducts,
    CreateOrder(NewOrder),
    ListOrders { user_id: Option<i32> },
}

impl Operation {
    /// Family whose tables the operation touches; `None` for family-neutral ones
    pub fn family(&self) -> Option<SchemaFamily> {
        match self {
            Self::Initialize => None,
            Self::CreateApp(_)
            | Self::GetApp { .. }
            | Self::ListApps { .. }
            | Self::UpdateApp { .. }
            | Self::DeleteApp { .. }
            | Self::SaveAppData { .. }
            | Self::ListAppData { .. }
            | Self::RecordExecution { .. }
            | Self::ListExecutions { .. } => Some(SchemaFamily::AppCatalog),
            Self::CreateUser(_)
            | Self::GetUser { .. }
            | Self::ListUsers
            | Self::CreateProduct(_)
            | Self::GetProduct { .. }
            | Self::ListProducts
            | Self::CreateOrder(_)
            | Self::ListOrders { .. } => Some(SchemaFamily::Commerce),
        }
    }

    /// Short tag for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::CreateApp(_) => "create_app",
            Self::GetApp { .. } => "get_app",
            Self::ListApps { .. } => "list_apps",
            Self::UpdateApp { .. } => "update_app",
            Self::DeleteApp { .. } => "delete_app",
            Self::SaveAppData { .. } => "save_app_data",
            Self::ListAppData { .. } => "list_app_data",
            Self::RecordExecution { .. } => "record_execution",
            Self::ListExecutions { .. } => "list_executions",
            Self::CreateUser(_) => "create_user",
            Self::GetUser { .. } => "get_user",
            Self::ListUsers => "list_users",
            Self::CreateProduct(_) => "create_product",
            Self::GetProduct { .. } => "get_product",
            Self::ListProducts => "list_products",
            Self::CreateOrder(_) => "create_order",
            Self::ListOrders { .. } => "list_orders",
        }
    }
}

/// Typed result of an [`Operation`]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Initialized { family: SchemaFamily },
    AppCreated { id: String },
    App(App),
    Apps(Vec<App>),
    AppDeleted { id: String, existed: bool },
    DataSaved { id: String },
    AppData(Vec<AppDataRecord>),
    ExecutionRecorded { id: String },
    Executions(Vec<AppExecution>),
    User(User),
    Users(Vec<User>),
    Product(Product),
    Products(Vec<Product>),
    Order(Order),
    Orders(Vec<OrderDetails>),
}
