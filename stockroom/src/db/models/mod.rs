//! Database request and response models.
//!
//! These structs define what the repositories accept and return. They are distinct
//! from the API models in [`crate::api::models`], which define the HTTP contract.

pub mod products;
pub mod users;
