//! Borrow/return and history endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        borrow::{BorrowedBookDetails, HistoryEntry},
        user::Role,
    },
};

use super::AuthenticatedUser;

/// Borrow request
#[derive(Deserialize, ToSchema)]
pub struct BorrowRequest {
    pub book_id: i32,
}

/// Return request
#[derive(Deserialize, ToSchema)]
pub struct ReturnRequest {
    pub history_id: i32,
    pub book_id: i32,
}

/// Return response
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    pub success: bool,
    pub message: String,
    pub return_date: NaiveDate,
}

/// Delete response
#[derive(Serialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

/// Borrow a book (member only)
#[utoipa::path(
    post,
    path = "/borrow-book",
    tag = "borrows",
    security(("bearer_auth" = [])),
    request_body = BorrowRequest,
    responses(
        (status = 200, description = "Borrowed; plain-text confirmation", body = String),
        (status = 403, description = "Only members can borrow books"),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Borrow limit reached or no copies available")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<BorrowRequest>,
) -> AppResult<String> {
    claims.require_role(Role::Member)?;

    let receipt = state
        .services
        .borrows
        .borrow_book(claims.user_id, request.book_id)
        .await?;

    Ok(format!("\"{}\" borrowed successfully", receipt.title))
}

/// Return a borrowed book (member only)
#[utoipa::path(
    post,
    path = "/return-book",
    tag = "borrows",
    security(("bearer_auth" = [])),
    request_body = ReturnRequest,
    responses(
        (status = 200, description = "Returned", body = ReturnResponse),
        (status = 400, description = "Already returned or invalid request"),
        (status = 403, description = "Only members can return books")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<ReturnRequest>,
) -> AppResult<Json<ReturnResponse>> {
    claims.require_role(Role::Member)?;

    let return_date = state
        .services
        .borrows
        .return_book(claims.user_id, request.history_id, request.book_id)
        .await?;

    Ok(Json(ReturnResponse {
        success: true,
        message: "Book returned successfully".to_string(),
        return_date,
    }))
}

/// All borrow records with user and book details (admin only)
#[utoipa::path(
    get,
    path = "/borrowed-books/data",
    tag = "borrows",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All borrow records", body = Vec<BorrowedBookDetails>),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn list_borrowed_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowedBookDetails>>> {
    claims.require_role(Role::Admin)?;

    let rows = state.services.borrows.list_borrowed().await?;
    Ok(Json(rows))
}

/// Delete a borrow record (admin only)
#[utoipa::path(
    delete,
    path = "/borrowed-books/delete/{id}",
    tag = "borrows",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "History record ID")
    ),
    responses(
        (status = 200, description = "Record deleted", body = DeleteResponse),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Record not found")
    )
)]
pub async fn delete_history_record(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<DeleteResponse>> {
    claims.require_role(Role::Admin)?;

    state.services.borrows.delete_record(id).await?;

    Ok(Json(DeleteResponse {
        message: "Record deleted successfully".to_string(),
    }))
}

/// Borrow history for the caller; admins see every record
#[utoipa::path(
    get,
    path = "/history/data",
    tag = "borrows",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Borrow history", body = Vec<HistoryEntry>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn history_data(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<HistoryEntry>>> {
    let rows = state.services.borrows.history_for(&claims).await?;
    Ok(Json(rows))
}
