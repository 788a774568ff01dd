//! HTTP API layer.

pub mod handlers;
pub mod models;
