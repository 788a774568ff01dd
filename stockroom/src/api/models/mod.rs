//! API request and response data models.
//!
//! These structures define the public HTTP contract. They are distinct from the
//! database models in [`crate::db::models`], allowing the API and storage
//! representations to evolve independently. All models are annotated with
//! `utoipa` for the generated API docs.

pub mod auth;
pub mod products;
