//! Biblios Library Management System
//!
//! A Rust REST server for a small library: token-based authentication,
//! admin/member roles, a book catalog, and a transactional borrow/return
//! workflow over PostgreSQL.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
