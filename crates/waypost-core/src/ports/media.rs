//! Media storage port.

use async_trait::async_trait;

use crate::domain::MediaRef;

/// Storage holding images referenced by posts.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Request deletion of a stored asset. Deleting an asset that is
    /// already gone succeeds.
    async fn delete(&self, media: &MediaRef) -> Result<(), MediaError>;
}

/// Media storage errors.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Invalid media id: {0}")]
    InvalidId(String),

    #[error("Media backend error: {0}")]
    Backend(String),
}
