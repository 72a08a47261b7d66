//! Borrow/return workflow service

use chrono::NaiveDate;

use crate::{
    config::BorrowsConfig,
    error::AppResult,
    models::borrow::{BorrowReceipt, BorrowedBookDetails, HistoryEntry},
    models::user::UserClaims,
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
    config: BorrowsConfig,
}

impl BorrowsService {
    pub fn new(repository: Repository, config: BorrowsConfig) -> Self {
        Self { repository, config }
    }

    /// Borrow a book for the calling member
    pub async fn borrow_book(&self, user_id: i32, book_id: i32) -> AppResult<BorrowReceipt> {
        let receipt = self
            .repository
            .borrows
            .borrow(user_id, book_id, self.config.max_open)
            .await?;

        tracing::info!(
            "User id={} borrowed book id={} (history id={})",
            user_id,
            book_id,
            receipt.history_id
        );
        Ok(receipt)
    }

    /// Return a borrowed book for the calling member
    pub async fn return_book(
        &self,
        user_id: i32,
        history_id: i32,
        book_id: i32,
    ) -> AppResult<NaiveDate> {
        let return_date = self
            .repository
            .borrows
            .return_book(user_id, history_id, book_id)
            .await?;

        tracing::info!(
            "User id={} returned book id={} (history id={})",
            user_id,
            book_id,
            history_id
        );
        Ok(return_date)
    }

    /// Full borrow report for admins
    pub async fn list_borrowed(&self) -> AppResult<Vec<BorrowedBookDetails>> {
        self.repository.borrows.list_details().await
    }

    /// Borrow history scoped to the caller; admins see everything
    pub async fn history_for(&self, claims: &UserClaims) -> AppResult<Vec<HistoryEntry>> {
        let scope = if claims.is_admin() {
            None
        } else {
            Some(claims.user_id)
        };
        self.repository.borrows.history(scope).await
    }

    /// Delete a history record (admin)
    pub async fn delete_record(&self, history_id: i32) -> AppResult<()> {
        self.repository.borrows.delete(history_id).await
    }
}
