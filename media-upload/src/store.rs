use async_trait::async_trait;
use media_core::{CreateMedia, Media, RawFile, StoredFile};

/// Sends files to remote storage (Cloudinary, S3, ...)
///
/// Results are positional: entry `i` belongs to `files[i]`. A shorter result
/// means the trailing files got no upload. An `Err` fails the whole call.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    async fn upload(&self, files: &[RawFile]) -> anyhow::Result<Vec<StoredFile>>;
}

/// Persists media metadata once files are stored
///
/// Returns the saved records carrying server ids and timestamps.
#[async_trait]
pub trait MediaPersister: Send + Sync {
    async fn save(&self, records: Vec<CreateMedia>) -> anyhow::Result<Vec<Media>>;
}

#[async_trait]
impl<T: UploadTransport + ?Sized> UploadTransport for std::sync::Arc<T> {
    async fn upload(&self, files: &[RawFile]) -> anyhow::Result<Vec<StoredFile>> {
        (**self).upload(files).await
    }
}

#[async_trait]
impl<T: MediaPersister + ?Sized> MediaPersister for std::sync::Arc<T> {
    async fn save(&self, records: Vec<CreateMedia>) -> anyhow::Result<Vec<Media>> {
        (**self).save(records).await
    }
}
