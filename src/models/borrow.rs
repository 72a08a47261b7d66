//! Borrow record reporting rows and receipts

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Receipt for a successful borrow
#[derive(Debug, Clone)]
pub struct BorrowReceipt {
    pub history_id: i32,
    pub title: String,
    pub borrow_date: NaiveDate,
}

/// Joined row for the admin borrowed-books report
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BorrowedBookDetails {
    pub id: i32,
    pub user_name: String,
    pub user_email: String,
    pub book_title: String,
    pub borrow_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

/// Joined row for a user's borrow history
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct HistoryEntry {
    pub history_id: i32,
    pub title: String,
    pub photo: Option<String>,
    pub borrow_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}
