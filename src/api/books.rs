//! Book catalog endpoints

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, CreateBook, PhotoUpload},
        user::Role,
    },
};

use super::{AuthenticatedUser, MessageResponse};

/// Create a new book from a multipart form (admin only).
/// Fields: title, author, category, total_copies, optional photo.
#[utoipa::path(
    post,
    path = "/add-book",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Book created", body = MessageResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    claims.require_role(Role::Admin)?;

    let mut title = None;
    let mut author = None;
    let mut category = None;
    let mut total_copies_raw = None;
    let mut photo = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("title") => title = Some(read_text(field).await?),
            Some("author") => author = Some(read_text(field).await?),
            Some("category") => category = Some(read_text(field).await?),
            Some("total_copies") => total_copies_raw = Some(read_text(field).await?),
            Some("photo") => {
                let file_name = field.file_name().map(ToString::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid photo upload: {}", e)))?;
                if !data.is_empty() {
                    photo = Some(PhotoUpload {
                        file_name,
                        data: data.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let (Some(title), Some(author), Some(category), Some(total_copies_raw)) =
        (title, author, category, total_copies_raw)
    else {
        return Err(AppError::Validation("Missing fields".to_string()));
    };

    if title.is_empty() || author.is_empty() || category.is_empty() {
        return Err(AppError::Validation("Missing fields".to_string()));
    }

    let total_copies: i32 = total_copies_raw.parse().map_err(|_| {
        AppError::Validation("total_copies must be a positive integer".to_string())
    })?;
    if total_copies < 1 {
        return Err(AppError::Validation(
            "total_copies must be a positive integer".to_string(),
        ));
    }

    let book = CreateBook {
        title,
        author,
        category,
        total_copies,
    };

    state.services.catalog.create_book(book, photo).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            success: true,
            message: "Book added".to_string(),
        }),
    ))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    let text = field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {}", e)))?;
    Ok(text.trim().to_string())
}

/// List all books in the catalog
#[utoipa::path(
    get,
    path = "/see-books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}
