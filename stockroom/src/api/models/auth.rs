use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::UserId;

/// Request to login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Username
    pub username: String,
    /// Password (compared as plain text against the stored value)
    pub password: String,
}

/// Response after successful login.
///
/// Carries exactly the three fields the frontend writes to local storage as its
/// session flags, plus a status message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// The logged-in user's ID
    #[schema(value_type = uuid::Uuid)]
    pub user_id: UserId,
    /// The logged-in user's username
    pub username: String,
    /// The logged-in user's role (only "admin" is treated specially)
    pub role: String,
    /// Success message
    pub message: String,
}

/// Response after logout.
///
/// Logout is stateless on the server; the frontend clears its local storage.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_carries_exactly_the_session_fields() {
        let response = LoginResponse {
            user_id: uuid::Uuid::nil(),
            username: "budi".to_string(),
            role: "admin".to_string(),
            message: "Login successful".to_string(),
        };

        let value = serde_json::to_value(&response).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["message", "role", "user_id", "username"]);
    }

    #[test]
    fn test_login_request_deserializes() {
        let request: LoginRequest = serde_json::from_str(r#"{"username": "budi", "password": "rahasia"}"#).unwrap();
        assert_eq!(request.username, "budi");
        assert_eq!(request.password, "rahasia");
    }
}
