//! Image uploads stored on the local file system.
//!
//! Files live in `{storage_dir}/{bucket}/{owner}-{random}.{ext}`. The database stores the
//! relative `bucket/name` path, which `model::storage::storage_url` turns into a public URL.

use std::path::{Path, PathBuf};

use rand::{distr::Alphanumeric, Rng};

use crate::server::{
    error::AppError,
    model::storage::{Bucket, ImageKind},
};

const RANDOM_NAME_LENGTH: usize = 16;

/// A stored file read back for serving.
#[derive(Debug)]
pub struct StoredFile {
    pub kind: ImageKind,
    pub bytes: Vec<u8>,
}

pub struct StorageService<'a> {
    root: &'a Path,
    max_bytes: usize,
}

impl<'a> StorageService<'a> {
    pub fn new(root: &'a Path, max_bytes: usize) -> Self {
        Self { root, max_bytes }
    }

    /// Validates and writes an uploaded image.
    ///
    /// # Arguments
    /// - `bucket` - Target bucket
    /// - `owner_id` - Id of the row the image belongs to, used as file name prefix
    /// - `content_type` - Content-Type header of the upload
    /// - `bytes` - Request body
    ///
    /// # Returns
    /// - `Ok(path)` - Relative `bucket/name` path to store in the database
    /// - `Err(AppError::BadRequest)` - Empty body, too large or unsupported type
    /// - `Err(AppError::IoErr)` - Writing the file failed
    pub async fn save(
        &self,
        bucket: Bucket,
        owner_id: i32,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        if bytes.is_empty() {
            return Err(AppError::BadRequest("The uploaded file is empty".to_string()));
        }
        if bytes.len() > self.max_bytes {
            return Err(AppError::BadRequest(format!(
                "The uploaded file exceeds the limit of {} bytes",
                self.max_bytes
            )));
        }
        let kind = content_type
            .and_then(ImageKind::from_content_type)
            .ok_or_else(|| {
                AppError::BadRequest("Only PNG, JPEG, WebP and GIF images are accepted".to_string())
            })?;

        let name = format!("{}-{}.{}", owner_id, random_name(), kind.extension());
        let dir = self.root.join(bucket.as_str());
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&name), bytes).await?;

        tracing::debug!("Stored {} bytes as {}/{}", bytes.len(), bucket.as_str(), name);

        Ok(format!("{}/{}", bucket.as_str(), name))
    }

    /// Reads a stored file for `GET /api/storage/{bucket}/{name}`.
    ///
    /// # Returns
    /// - `Ok(StoredFile)` - File content and its image kind
    /// - `Err(AppError::BadRequest)` - Name contains a path separator or `..`
    /// - `Err(AppError::NotFound)` - Unknown bucket, extension or file
    pub async fn read(&self, bucket: &str, name: &str) -> Result<StoredFile, AppError> {
        let (path, kind) = self.resolve(bucket, name)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(StoredFile { kind, bytes }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound("File not found".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes a previously stored file. Failures are logged and otherwise ignored.
    pub async fn remove(&self, stored_path: &str) {
        let Some((bucket, name)) = stored_path.split_once('/') else {
            tracing::warn!("Ignoring malformed stored path {}", stored_path);
            return;
        };

        let path = match self.resolve(bucket, name) {
            Ok((path, _)) => path,
            Err(e) => {
                tracing::warn!("Ignoring stored path {}: {}", stored_path, e);
                return;
            }
        };

        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!("Failed to delete {}: {}", path.display(), e);
        }
    }

    fn resolve(&self, bucket: &str, name: &str) -> Result<(PathBuf, ImageKind), AppError> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(AppError::BadRequest("Invalid file name".to_string()));
        }
        let bucket = Bucket::parse(bucket)?;
        let kind = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageKind::from_extension)
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

        Ok((self.root.join(bucket.as_str()).join(name), kind))
    }
}

fn random_name() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_NAME_LENGTH)
        .map(char::from)
        .collect()
}
