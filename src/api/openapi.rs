//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, borrows, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblios API",
        version = "0.1.0",
        description = "Library Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::logout,
        // Users
        users::create_user,
        // Books
        books::create_book,
        books::list_books,
        // Borrows
        borrows::borrow_book,
        borrows::return_book,
        borrows::list_borrowed_books,
        borrows::delete_history_record,
        borrows::history_data,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            // Users
            crate::models::user::CreateUser,
            crate::models::user::Role,
            // Books
            crate::models::book::Book,
            // Borrows
            borrows::BorrowRequest,
            borrows::ReturnRequest,
            borrows::ReturnResponse,
            borrows::DeleteResponse,
            crate::models::borrow::BorrowedBookDetails,
            crate::models::borrow::HistoryEntry,
            // Health
            health::HealthResponse,
            // Shared
            crate::api::MessageResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User administration"),
        (name = "books", description = "Book catalog"),
        (name = "borrows", description = "Borrow/return workflow and history")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
