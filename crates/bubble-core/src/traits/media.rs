//! Media storage port
//!
//! Accepts an uploaded file and returns a stable retrievable URL plus a
//! coarse type classification. Where the bytes actually live is an
//! implementation detail.

use async_trait::async_trait;

use crate::entities::MediaType;
use crate::error::DomainError;

/// A stored media object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Stable URL the media can be fetched from
    pub url: String,
    pub media_type: MediaType,
}

/// Media storage collaborator
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store an upload and return its URL and classification
    ///
    /// Fails with `Validation` for unsupported or oversized files and
    /// `Storage` for I/O failures.
    async fn store(&self, filename: &str, bytes: &[u8]) -> Result<StoredMedia, DomainError>;
}
