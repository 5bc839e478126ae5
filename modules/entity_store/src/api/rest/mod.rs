//! REST API layer

pub mod error;
pub mod handlers;
pub mod routes;

pub use routes::register_routes;
