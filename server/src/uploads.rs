//! Temporary media store.
//!
//! Uploaded image/audio files live on local disk for the duration of one
//! request: received here, handed to the inference gateway, then released.
//! Release must happen exactly once per accepted upload on every exit path;
//! consuming [`UploadHandle::release`] enforces that at the type level.

use chrono::Utc;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Audio uploads are capped at 10 MB.
pub const MAX_AUDIO_BYTES: usize = 10 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("No file uploaded")]
    Empty,

    #[error("Only audio files are allowed")]
    NotAudio,

    #[error("File too large. Maximum size is {MAX_AUDIO_BYTES} bytes")]
    TooLarge,

    #[error("failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Store rooted at a single uploads directory (also served statically).
#[derive(Debug)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Accept an uploaded image.
    pub async fn receive_image(
        &self,
        original_name: Option<&str>,
        data: &[u8],
    ) -> Result<UploadHandle, UploadError> {
        if data.is_empty() {
            return Err(UploadError::Empty);
        }
        self.store("image", original_name, data).await
    }

    /// Accept an uploaded audio file. Only `audio/*` MIME types are allowed,
    /// capped at [`MAX_AUDIO_BYTES`].
    pub async fn receive_audio(
        &self,
        original_name: Option<&str>,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Result<UploadHandle, UploadError> {
        if data.is_empty() {
            return Err(UploadError::Empty);
        }
        if !content_type.is_some_and(|ct| ct.starts_with("audio/")) {
            return Err(UploadError::NotAudio);
        }
        if data.len() > MAX_AUDIO_BYTES {
            return Err(UploadError::TooLarge);
        }
        self.store("voice", original_name, data).await
    }

    async fn store(
        &self,
        prefix: &str,
        original_name: Option<&str>,
        data: &[u8],
    ) -> Result<UploadHandle, UploadError> {
        // Timestamp plus a random suffix keeps concurrent requests from
        // colliding on a filename.
        let unique = format!(
            "{}-{}-{}",
            prefix,
            Utc::now().timestamp_millis(),
            rand::random::<u32>() % 1_000_000_000
        );
        let file_name = match original_name.and_then(extension_of) {
            Some(ext) => format!("{}.{}", unique, ext),
            None => unique,
        };

        let path = self.root.join(file_name);
        tokio::fs::write(&path, data).await?;

        Ok(UploadHandle { path })
    }
}

/// Extract a safe (alphanumeric, short) extension from an uploaded filename.
fn extension_of(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    if ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext.to_ascii_lowercase())
    } else {
        None
    }
}

/// Handle to one temporary file. Dropping without releasing leaks the file;
/// every accepted upload must end in [`UploadHandle::release`].
#[derive(Debug)]
pub struct UploadHandle {
    path: PathBuf,
}

impl UploadHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file. Best-effort: the primary request's outcome does not
    /// depend on cleanup, so failures are logged and swallowed.
    pub async fn release(self) {
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to delete temporary upload"
            );
        }
    }
}
