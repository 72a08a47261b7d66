//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a new book; available_copies starts equal to total_copies
    pub async fn create(&self, book: &CreateBook, photo: Option<&str>) -> AppResult<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO books (title, author, category, total_copies, available_copies, photo)
            VALUES ($1, $2, $3, $4, $4, $5)
            RETURNING book_id
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.category)
        .bind(book.total_copies)
        .bind(photo)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// List all books
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT book_id AS id, title, author, category,
                   total_copies, available_copies, photo
            FROM books
            ORDER BY title, book_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }
}
