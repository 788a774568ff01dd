//! HTTP request handlers.

pub mod auth;
pub mod products;
pub mod static_assets;
