//! Disk media storage
//!
//! Stores uploads under a local directory with a UUID filename that keeps
//! the original extension, and serves back a stable `/uploads/...` URL.
//! Classification is coarse (image/video/audio) and driven entirely by
//! the extension; anything else is rejected before touching the disk.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use bubble_core::{DomainError, MediaStore, MediaType, StoredMedia};

/// URL prefix stored uploads are served under
const PUBLIC_PREFIX: &str = "/uploads";

/// Media storage on the local filesystem
pub struct DiskMediaStore {
    root: PathBuf,
    max_bytes: usize,
}

impl DiskMediaStore {
    /// Create a store rooted at `root` with an upload size cap
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }
}

#[async_trait]
impl MediaStore for DiskMediaStore {
    async fn store(&self, filename: &str, bytes: &[u8]) -> Result<StoredMedia, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::validation("Empty upload"));
        }
        if bytes.len() > self.max_bytes {
            return Err(DomainError::validation(format!(
                "File too large: max {} bytes",
                self.max_bytes
            )));
        }

        let extension = Path::new(filename)
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .ok_or_else(|| DomainError::validation("Missing file extension"))?;
        let media_type = MediaType::from_extension(&extension).ok_or_else(|| {
            DomainError::validation(format!("Unsupported media type: .{extension}"))
        })?;

        let stored_name = format!("{}.{extension}", Uuid::new_v4());
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        tokio::fs::write(self.root.join(&stored_name), bytes)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        debug!(name = %stored_name, size = bytes.len(), "Stored upload");

        Ok(StoredMedia {
            url: format!("{PUBLIC_PREFIX}/{stored_name}"),
            media_type,
        })
    }
}
