use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::auth::{LoginRequest, LoginResponse, LogoutResponse},
    db::handlers::Users,
    errors::Error,
};

/// Login with username and password.
///
/// Looks the username up with an equality match and compares the password as a
/// plain string. The two failure cases return distinct messages so the login
/// form can tell the user which field was wrong.
#[utoipa::path(
    post,
    path = "/authentication/login",
    request_body = LoginRequest,
    tag = "authentication",
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing credentials"),
        (status = 401, description = "Unknown username or wrong password"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>, Error> {
    if request.username.trim().is_empty() || request.password.is_empty() {
        return Err(Error::BadRequest {
            message: "Username and password are required".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut conn);

    // Find user by username
    let user = user_repo
        .get_by_username(&request.username)
        .await?
        .ok_or_else(|| Error::Unauthenticated {
            message: Some("username not found".to_string()),
        })?;

    // Plain string comparison - credentials are stored unhashed
    if user.password != request.password {
        return Err(Error::Unauthenticated {
            message: Some("wrong password".to_string()),
        });
    }

    Ok(Json(LoginResponse {
        user_id: user.id,
        username: user.username,
        role: user.role,
        message: "Login successful".to_string(),
    }))
}

/// Logout.
///
/// There is no server-side session to destroy: the frontend clears its local
/// storage wholesale. This endpoint exists so the logout action has something
/// to acknowledge it.
#[utoipa::path(
    post,
    path = "/authentication/logout",
    tag = "authentication",
    responses(
        (status = 200, description = "Logout acknowledged", body = LogoutResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn logout() -> Json<LogoutResponse> {
    Json(LogoutResponse {
        message: "Logout successful".to_string(),
    })
}
