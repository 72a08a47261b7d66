//! Borrow history repository for database operations
//!
//! Borrow and return are multi-step mutations; every path here runs inside a
//! single transaction so the availability invariant
//! (available_copies = total_copies - open records) survives crashes and
//! concurrent requests.

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::borrow::{BorrowReceipt, BorrowedBookDetails, HistoryEntry},
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Borrow a book: check the caller's open-record limit, take a copy, and
    /// insert the open history row. All-or-nothing.
    pub async fn borrow(&self, user_id: i32, book_id: i32, max_open: i64) -> AppResult<BorrowReceipt> {
        let mut tx = self.pool.begin().await?;

        // Lock the user row so two in-flight borrows by the same member
        // cannot both pass the limit check.
        sqlx::query_scalar::<_, i32>("SELECT user_id FROM users WHERE user_id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", user_id)))?;

        let open_records: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrow_history WHERE user_id = $1 AND return_date IS NULL",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        if open_records >= max_open {
            return Err(AppError::BusinessRule(format!(
                "Max {} books allowed",
                max_open
            )));
        }

        // Conditional decrement: the availability check and the write are one
        // statement, so a last copy can only be taken once.
        let title: Option<String> = sqlx::query_scalar(
            r#"
            UPDATE books
            SET available_copies = available_copies - 1
            WHERE book_id = $1 AND available_copies > 0
            RETURNING title
            "#,
        )
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(title) = title else {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE book_id = $1)")
                    .bind(book_id)
                    .fetch_one(&mut *tx)
                    .await?;

            return Err(if exists {
                AppError::BusinessRule("No copies available".to_string())
            } else {
                AppError::NotFound(format!("Book with id {} not found", book_id))
            });
        };

        let borrow_date = Utc::now().date_naive();

        let history_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO borrow_history (user_id, book_id, borrow_date)
            VALUES ($1, $2, $3)
            RETURNING history_id
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(borrow_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(BorrowReceipt {
            history_id,
            title,
            borrow_date,
        })
    }

    /// Close an open borrow record owned by the caller and re-credit the
    /// book. The conditional update's affected-row count distinguishes
    /// success from "already returned or not owned".
    pub async fn return_book(
        &self,
        user_id: i32,
        history_id: i32,
        book_id: i32,
    ) -> AppResult<NaiveDate> {
        let mut tx = self.pool.begin().await?;

        let return_date = Utc::now().date_naive();

        let closed = sqlx::query(
            r#"
            UPDATE borrow_history
            SET return_date = $1
            WHERE history_id = $2 AND user_id = $3 AND book_id = $4 AND return_date IS NULL
            "#,
        )
        .bind(return_date)
        .bind(history_id)
        .bind(user_id)
        .bind(book_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if closed == 0 {
            return Err(AppError::BadRequest(
                "Book already returned or invalid request".to_string(),
            ));
        }

        sqlx::query(
            r#"
            UPDATE books
            SET available_copies = available_copies + 1
            WHERE book_id = $1 AND available_copies < total_copies
            "#,
        )
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(return_date)
    }

    /// All borrow records joined with user and book, for the admin report
    pub async fn list_details(&self) -> AppResult<Vec<BorrowedBookDetails>> {
        let rows = sqlx::query_as::<_, BorrowedBookDetails>(
            r#"
            SELECT h.history_id AS id, u.name AS user_name, u.email AS user_email,
                   b.title AS book_title, h.borrow_date, h.return_date
            FROM borrow_history h
            JOIN users u ON h.user_id = u.user_id
            JOIN books b ON h.book_id = b.book_id
            ORDER BY h.borrow_date DESC, h.history_id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Borrow history joined with book details; scoped to one user unless
    /// `user_id` is None (admin view).
    pub async fn history(&self, user_id: Option<i32>) -> AppResult<Vec<HistoryEntry>> {
        let rows = match user_id {
            Some(user_id) => {
                sqlx::query_as::<_, HistoryEntry>(
                    r#"
                    SELECT h.history_id, b.title, b.photo, h.borrow_date, h.return_date
                    FROM borrow_history h
                    JOIN books b ON h.book_id = b.book_id
                    WHERE h.user_id = $1
                    ORDER BY h.borrow_date DESC, h.history_id DESC
                    "#,
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, HistoryEntry>(
                    r#"
                    SELECT h.history_id, b.title, b.photo, h.borrow_date, h.return_date
                    FROM borrow_history h
                    JOIN books b ON h.book_id = b.book_id
                    ORDER BY h.borrow_date DESC, h.history_id DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    /// Delete a history record. A still-open record re-credits the book in
    /// the same transaction, keeping the availability invariant.
    pub async fn delete(&self, history_id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let deleted: Option<(i32, bool)> = sqlx::query_as(
            r#"
            DELETE FROM borrow_history
            WHERE history_id = $1
            RETURNING book_id, (return_date IS NULL) AS was_open
            "#,
        )
        .bind(history_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((book_id, was_open)) = deleted else {
            return Err(AppError::NotFound("Record not found".to_string()));
        };

        if was_open {
            sqlx::query(
                r#"
                UPDATE books
                SET available_copies = available_copies + 1
                WHERE book_id = $1 AND available_copies < total_copies
                "#,
            )
            .bind(book_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
