//! Catalog management service

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, PhotoUpload},
    repository::Repository,
    services::uploads::UploadsService,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    uploads: UploadsService,
}

impl CatalogService {
    pub fn new(repository: Repository, uploads: UploadsService) -> Self {
        Self { repository, uploads }
    }

    /// Create a new book, storing the uploaded cover photo if present
    pub async fn create_book(
        &self,
        book: CreateBook,
        photo: Option<PhotoUpload>,
    ) -> AppResult<i32> {
        let photo_name = match photo {
            Some(photo) => Some(self.uploads.store(&photo).await?),
            None => None,
        };

        let id = self
            .repository
            .books
            .create(&book, photo_name.as_deref())
            .await?;

        tracing::info!(
            "Added book id={} \"{}\" ({} copies)",
            id,
            book.title,
            book.total_copies
        );
        Ok(id)
    }

    /// List all books
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }
}
