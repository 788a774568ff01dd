//! Common type definitions.
//!
//! All entity IDs are UUIDs wrapped in type aliases:
//!
//! - [`UserId`]: credential row identifier
//! - [`ProductId`]: product row identifier

use uuid::Uuid;

// Type aliases for IDs
pub type UserId = Uuid;
pub type ProductId = Uuid;

/// Role string granted full product management on the dashboard.
///
/// Roles are free-form text; this is the only value the application checks.
pub const ADMIN_ROLE: &str = "admin";

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}
