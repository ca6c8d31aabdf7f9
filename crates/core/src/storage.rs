//! File storage for uploaded images.
//!
//! Stored paths are what the database keeps in `image_paths` and in the
//! image rows. Public URLs are derived from the basename only, matching the
//! flat directory served under `/api/v1/pictures`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::CoreError;

/// Route prefix the upload directory is served under.
pub const PICTURES_ROUTE: &str = "/api/v1/pictures";

/// Storage contract used by the image upload flow.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Write `data` under `name` and return the stored path.
    async fn save(&self, name: &str, data: &[u8]) -> Result<String, CoreError>;

    /// Whether a stored path currently exists.
    async fn exists(&self, stored_path: &str) -> bool;

    /// Remove a stored path. Missing files are not an error.
    async fn delete_if_exists(&self, stored_path: &str) -> Result<(), CoreError>;

    /// Public URL for a stored path.
    fn public_url(&self, stored_path: &str) -> String;
}

/// Build the public URL for a stored path under `base_url`.
pub fn picture_url(base_url: &str, stored_path: &str) -> String {
    let name = Path::new(stored_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}{PICTURES_ROUTE}/{name}", base_url.trim_end_matches('/'))
}

// ---------------------------------------------------------------------------
// Local filesystem
// ---------------------------------------------------------------------------

/// Stores files in a single local directory.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn save(&self, name: &str, data: &[u8]) -> Result<String, CoreError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to create upload dir: {e}")))?;

        let path = self.root.join(name);
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to write {name}: {e}")))?;

        Ok(path.to_string_lossy().into_owned())
    }

    async fn exists(&self, stored_path: &str) -> bool {
        tokio::fs::try_exists(stored_path).await.unwrap_or(false)
    }

    async fn delete_if_exists(&self, stored_path: &str) -> Result<(), CoreError> {
        match tokio::fs::remove_file(stored_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Internal(format!(
                "Failed to remove {stored_path}: {e}"
            ))),
        }
    }

    fn public_url(&self, stored_path: &str) -> String {
        picture_url(&self.public_base_url, stored_path)
    }
}
