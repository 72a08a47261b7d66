//! Book photo storage

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::{
    config::UploadsConfig,
    error::{AppError, AppResult},
    models::book::PhotoUpload,
};

#[derive(Clone)]
pub struct UploadsService {
    dir: PathBuf,
}

impl UploadsService {
    pub fn new(config: &UploadsConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
        }
    }

    /// Create the uploads directory if missing
    pub async fn ensure_dir(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create uploads directory: {}", e)))
    }

    /// Persist photo bytes under a unique filename, keeping the original
    /// extension; returns the stored filename.
    pub async fn store(&self, photo: &PhotoUpload) -> AppResult<String> {
        let extension = photo
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str());

        let file_name = match extension {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };

        tokio::fs::write(self.dir.join(&file_name), &photo.data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store photo: {}", e)))?;

        Ok(file_name)
    }
}
