//! Authentication endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::user::Role};

use super::{AuthenticatedUser, MessageResponse};

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Role the caller claims to log in as; must match the account
    pub role: Role,
}

/// Authenticated user summary
#[derive(Serialize, ToSchema)]
pub struct UserInfo {
    pub id: i32,
    pub name: String,
    pub role: Role,
}

/// Login response with bearer token
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub token_type: String,
    pub user: UserInfo,
}

/// Authenticate and obtain a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid email, password, or role")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, user) = state
        .services
        .auth
        .authenticate(&request.email, &request.password, request.role)
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        token,
        token_type: "Bearer".to_string(),
        user: UserInfo {
            id: user.id,
            name: user.name,
            role: user.role,
        },
    }))
}

/// End the session
#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout(AuthenticatedUser(claims): AuthenticatedUser) -> Json<MessageResponse> {
    // Tokens are stateless; logout acknowledges so the client drops its copy.
    tracing::info!("User id={} logged out", claims.user_id);
    Json(MessageResponse {
        success: true,
        message: "Logged out".to_string(),
    })
}
