use crate::{
    AppState,
    errors::{Error, Result},
    types::UserId,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{instrument, trace};

/// The client-asserted session fields, read from the request headers.
///
/// These mirror the three local-storage keys the frontend writes after login.
/// Presence of the username and role flags is the only requirement; their
/// validity is never checked against the database.
#[derive(Debug, Clone)]
pub struct SessionFlags {
    /// The logged-in user's ID, if the header carried a well-formed UUID
    pub user_id: Option<UserId>,
    pub username: String,
    pub role: String,
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|h| h.to_str().ok())
}

impl FromRequestParts<AppState> for SessionFlags {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let headers = &state.config.auth.session_flags;

        let username = header_str(parts, &headers.username_header);
        let role = header_str(parts, &headers.role_header);

        let (username, role) = match (username, role) {
            (Some(username), Some(role)) if !username.is_empty() && !role.is_empty() => (username, role),
            _ => {
                trace!("Request is missing session flags");
                return Err(Error::Unauthenticated { message: None });
            }
        };

        // The user ID flag is informational only; a missing or malformed value
        // does not reject the request.
        let user_id = header_str(parts, &headers.user_id_header).and_then(|v| v.parse().ok());

        Ok(SessionFlags {
            user_id,
            username: username.to_string(),
            role: role.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::lazy_test_state;
    use axum::{extract::FromRequestParts as _, http::request::Parts};

    fn parts_with_headers(headers: &[(&str, &str)]) -> Parts {
        let mut builder = axum::http::Request::builder().uri("http://localhost/api/v1/products");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let (parts, _body) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn test_all_flags_present() {
        let state = lazy_test_state();
        let mut parts = parts_with_headers(&[
            ("x-stockroom-user-id", "550e8400-e29b-41d4-a716-446655440000"),
            ("x-stockroom-username", "budi"),
            ("x-stockroom-role", "admin"),
        ]);

        let flags = SessionFlags::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(flags.username, "budi");
        assert_eq!(flags.role, "admin");
        assert_eq!(
            flags.user_id,
            Some("550e8400-e29b-41d4-a716-446655440000".parse().unwrap())
        );
    }

    #[tokio::test]
    async fn test_missing_all_flags_is_unauthenticated() {
        let state = lazy_test_state();
        let mut parts = parts_with_headers(&[]);

        let error = SessionFlags::from_request_parts(&mut parts, &state)
            .await
            .expect_err("missing flags should reject");
        assert_eq!(error.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_role_flag_is_unauthenticated() {
        let state = lazy_test_state();
        let mut parts = parts_with_headers(&[("x-stockroom-username", "budi")]);

        let error = SessionFlags::from_request_parts(&mut parts, &state)
            .await
            .expect_err("missing role flag should reject");
        assert_eq!(error.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_empty_flags_are_treated_as_missing() {
        let state = lazy_test_state();
        let mut parts = parts_with_headers(&[("x-stockroom-username", ""), ("x-stockroom-role", "")]);

        let result = SessionFlags::from_request_parts(&mut parts, &state).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_malformed_user_id_is_ignored() {
        let state = lazy_test_state();
        let mut parts = parts_with_headers(&[
            ("x-stockroom-user-id", "not-a-uuid"),
            ("x-stockroom-username", "budi"),
            ("x-stockroom-role", "user"),
        ]);

        let flags = SessionFlags::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(flags.user_id, None);
        assert_eq!(flags.role, "user");
    }

    #[tokio::test]
    async fn test_role_is_never_validated_against_database() {
        // Any non-empty role string passes extraction; only the admin gate
        // compares the value.
        let state = lazy_test_state();
        let mut parts = parts_with_headers(&[
            ("x-stockroom-username", "ghost"),
            ("x-stockroom-role", "made-up-role"),
        ]);

        let flags = SessionFlags::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(flags.role, "made-up-role");
    }
}
