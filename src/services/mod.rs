//! Business logic services

pub mod auth;
pub mod borrows;
pub mod catalog;
pub mod uploads;
pub mod users;

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub users: users::UsersService,
    pub catalog: catalog::CatalogService,
    pub borrows: borrows::BorrowsService,
    pub uploads: uploads::UploadsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        let uploads = uploads::UploadsService::new(&config.uploads);
        Self {
            auth: auth::AuthService::new(repository.clone(), config.auth.clone()),
            users: users::UsersService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone(), uploads.clone()),
            borrows: borrows::BorrowsService::new(repository, config.borrows.clone()),
            uploads,
        }
    }
}
