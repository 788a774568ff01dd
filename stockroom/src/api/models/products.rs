use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::products::ProductDBResponse;
use crate::types::ProductId;

/// Request to create a product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductCreate {
    /// Product name (must be non-empty)
    pub name: String,
    /// Unit price as a whole number
    pub unit_price: i64,
    /// Stock quantity
    pub quantity: i64,
}

/// Request to update a product. Omitted fields are left unchanged;
/// the dashboard form always submits all three.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub unit_price: Option<i64>,
    pub quantity: Option<i64>,
}

/// A product as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    #[schema(value_type = uuid::Uuid)]
    pub id: ProductId,
    pub name: String,
    pub unit_price: i64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductDBResponse> for ProductResponse {
    fn from(product: ProductDBResponse) -> Self {
        Self {
            id: product.id,
            name: product.name,
            unit_price: product.unit_price,
            quantity: product.quantity,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
