//! Local-disk media store - the fallback when no CDN is configured.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use waypost_core::domain::MediaRef;
use waypost_core::ports::{MediaError, MediaStore};

/// Deletes uploaded images from a directory on local disk.
pub struct LocalMediaStore {
    root: PathBuf,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a public id to a path under the root. Ids that would escape
    /// the root are rejected.
    fn resolve(&self, public_id: &str) -> Result<PathBuf, MediaError> {
        let relative = Path::new(public_id);
        let safe = !public_id.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(MediaError::InvalidId(public_id.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn delete(&self, media: &MediaRef) -> Result<(), MediaError> {
        let path = self.resolve(&media.public_id)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(public_id = %media.public_id, "Media deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(public_id = %media.public_id, "Media already absent");
                Ok(())
            }
            Err(e) => Err(MediaError::Backend(e.to_string())),
        }
    }
}
