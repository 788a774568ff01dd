//! Database access layer.
//!
//! Organized into [`models`] (request/response structs for the repositories) and
//! [`handlers`] (the repositories themselves). Errors are categorized in [`errors`].

pub mod errors;
pub mod handlers;
pub mod models;
