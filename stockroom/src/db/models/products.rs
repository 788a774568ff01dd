//! Database models for products.

use crate::types::ProductId;
use chrono::{DateTime, Utc};

/// Request to insert a product row.
#[derive(Debug, Clone)]
pub struct ProductCreateDBRequest {
    pub name: String,
    pub unit_price: i64,
    pub quantity: i64,
}

/// Request to update a product row. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdateDBRequest {
    pub name: Option<String>,
    pub unit_price: Option<i64>,
    pub quantity: Option<i64>,
}

/// A product row as returned by the repository.
#[derive(Debug, Clone)]
pub struct ProductDBResponse {
    pub id: ProductId,
    pub name: String,
    pub unit_price: i64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
