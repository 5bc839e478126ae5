//! Storage layer - database entities, schema and repositories

pub mod connect;
pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod repositories;

pub use connect::open_partition_db;
pub use migrations::{ensure_schema, has_table, tables_of};
pub use repositories::{SeaOrmCatalogRepository, SeaOrmCommerceRepository};
