//! Entity Store Module
//!
//! Partitioned, single-writer entity store over embedded SQLite. Each
//! partition is served by one worker that executes operations strictly one
//! at a time; requests reach it through an opaque verb/path dispatcher, the
//! REST adapter or the typed native client.

// Public exports
pub mod contract;
pub use contract::{
    client::StoreClient, error::StoreError, App, AppDataRecord, AppExecution, AppPatch,
    ErrorKind, ExecutionStatus, NewApp, NewOrder, NewProduct, NewUser, Order, OrderDetails,
    PerformanceMetric, Product, User, UserInput,
};

pub mod config;
pub use config::{Config, SchemaFamily, StorageConfig};

pub mod module;
pub use module::EntityStoreModule;

pub use api::dispatch::{Dispatcher, Envelope, Request, Verb};

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
