//! Database models for users.

use crate::types::UserId;
use chrono::{DateTime, Utc};

/// Request to insert a credential row.
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub username: String,
    /// Stored as plain text; login compares with string equality.
    pub password: String,
    pub role: String,
}

/// Request to update a credential row. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserUpdateDBRequest {
    pub password: Option<String>,
    pub role: Option<String>,
}

/// A credential row as returned by the repository.
#[derive(Debug, Clone)]
pub struct UserDBResponse {
    pub id: UserId,
    pub username: String,
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}
