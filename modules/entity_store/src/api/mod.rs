//! API layer - request dispatch, REST adapter and native client

pub mod dispatch;
pub mod native;
pub mod rest;
