//! Book model and related types

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book model from database
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub category: String,
    pub total_copies: i32,
    pub available_copies: i32,
    /// Stored photo filename, if a cover was uploaded
    pub photo: Option<String>,
}

/// Create book payload, parsed from the multipart form
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub category: String,
    pub total_copies: i32,
}

/// Uploaded photo content, not yet persisted
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: Option<String>,
    pub data: Vec<u8>,
}
