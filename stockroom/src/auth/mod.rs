//! Session flag authentication.
//!
//! There is no server-side session state. After login the frontend keeps three
//! fields in browser local storage and echoes them back as plain HTTP headers on
//! every API call. The [`SessionFlags`] extractor checks only that the flags are
//! present - they are never validated against the database. See
//! [`crate::config::SessionFlagsConfig`] for the header names.

pub mod session_flags;

pub use session_flags::SessionFlags;

use crate::errors::{Error, Result};
use crate::types::ADMIN_ROLE;

/// Gate an operation on the client-asserted admin role flag.
pub fn require_admin(flags: SessionFlags) -> Result<SessionFlags> {
    if flags.role == ADMIN_ROLE {
        Ok(flags)
    } else {
        Err(Error::InsufficientPermissions {
            action: "manage".to_string(),
            resource: "products".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn flags_with_role(role: &str) -> SessionFlags {
        SessionFlags {
            user_id: None,
            username: "testuser".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_require_admin_accepts_admin_role() {
        assert!(require_admin(flags_with_role("admin")).is_ok());
    }

    #[test]
    fn test_require_admin_rejects_other_roles() {
        for role in ["user", "viewer", "Admin", "ADMIN", ""] {
            let result = require_admin(flags_with_role(role));
            let error = result.expect_err("non-admin role should be rejected");
            assert_eq!(error.status_code(), StatusCode::FORBIDDEN);
        }
    }
}
