//! Contract layer - public API for in-process callers
//!
//! This layer contains transport-agnostic models and the native client trait.

pub mod client;
pub mod error;
pub mod model;

pub use client::StoreClient;
pub use error::{ErrorKind, StoreError};
pub use model::{
    data_type, App, AppDataRecord, AppExecution, AppPatch, ExecutionStatus, NewApp, NewOrder,
    NewProduct, NewUser, Order, OrderDetails, PerformanceMetric, Product, User, UserInput,
};
