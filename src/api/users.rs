//! User management endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, Role},
};

use super::{AuthenticatedUser, MessageResponse};

/// Create a new user (admin only)
#[utoipa::path(
    post,
    path = "/add-user",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Admin privileges required"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    claims.require_role(Role::Admin)?;

    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    state.services.users.create_user(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            success: true,
            message: "User added".to_string(),
        }),
    ))
}
