//! User administration service

use crate::{
    config::BootstrapConfig,
    error::{AppError, AppResult},
    models::user::{CreateUser, Role},
    repository::Repository,
    services::auth,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new user (admin action); the password is hashed before storage
    pub async fn create_user(&self, user: CreateUser) -> AppResult<i32> {
        if self.repository.users.email_exists(&user.email).await? {
            return Err(AppError::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }

        let hash = auth::hash_password(&user.password)?;
        let id = self
            .repository
            .users
            .create(&user.name, &user.email, user.role, &hash)
            .await?;

        tracing::info!("Created {} account id={} ({})", user.role, id, user.email);
        Ok(id)
    }

    /// Seed the first admin account so /add-user is reachable on a fresh
    /// database. No-op when any user already exists.
    pub async fn bootstrap_admin(&self, config: &BootstrapConfig) -> AppResult<()> {
        if self.repository.users.count().await? > 0 {
            return Ok(());
        }

        let hash = auth::hash_password(&config.admin_password)?;
        let id = self
            .repository
            .users
            .create(&config.admin_name, &config.admin_email, Role::Admin, &hash)
            .await?;

        tracing::info!("Bootstrapped admin account id={} ({})", id, config.admin_email);
        Ok(())
    }
}
