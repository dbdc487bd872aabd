//! Transient previews for files that are still being uploaded.
//!
//! A [`PreviewHandle`] is neither `Clone` nor `Copy`, and
//! [`PreviewProvider::release`] takes it by value, so a handle can be
//! released at most once. The controller owns every handle it creates and
//! releases it when the item leaves the visible list or the controller drops.

use std::collections::HashSet;

use media_core::RawFile;
use parking_lot::Mutex;
use uuid::Uuid;

/// Revocable reference to a rendering of a local file
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewHandle {
    url: String,
}

impl PreviewHandle {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_blob(&self) -> bool {
        self.url.starts_with("blob:")
    }
}

/// Creates and revokes previews
pub trait PreviewProvider: Send + Sync {
    /// Create a preview for a file about to be uploaded
    fn create(&self, file: &RawFile) -> PreviewHandle;

    /// Release a preview; consumes the handle
    fn release(&self, handle: PreviewHandle);
}

impl<T: PreviewProvider + ?Sized> PreviewProvider for std::sync::Arc<T> {
    fn create(&self, file: &RawFile) -> PreviewHandle {
        (**self).create(file)
    }

    fn release(&self, handle: PreviewHandle) {
        (**self).release(handle)
    }
}

/// In-memory pool handing out `blob:` URLs and tracking which are still live
#[derive(Debug, Default)]
pub struct BlobUrlPreviews {
    live: Mutex<HashSet<String>>,
}

impl BlobUrlPreviews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of previews created and not yet released
    pub fn live_count(&self) -> usize {
        self.live.lock().len()
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.live.lock().contains(url)
    }
}

impl PreviewProvider for BlobUrlPreviews {
    fn create(&self, file: &RawFile) -> PreviewHandle {
        let url = format!("blob:media/{}", Uuid::new_v4());
        self.live.lock().insert(url.clone());
        tracing::trace!(file = %file.name, %url, "Created preview");
        PreviewHandle::new(url)
    }

    fn release(&self, handle: PreviewHandle) {
        // Only blob URLs are ours to revoke
        if !handle.is_blob() {
            return;
        }
        if !self.live.lock().remove(handle.url()) {
            tracing::warn!(url = %handle.url(), "Released a preview that was not live");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_release() {
        let previews = BlobUrlPreviews::new();
        let file = RawFile::new("a.png", "image/png", vec![0u8; 4]);

        let first = previews.create(&file);
        let second = previews.create(&file);
        assert_ne!(first.url(), second.url());
        assert!(first.is_blob());
        assert_eq!(previews.live_count(), 2);

        let url = first.url().to_string();
        previews.release(first);
        assert!(!previews.is_live(&url));
        assert_eq!(previews.live_count(), 1);

        previews.release(second);
        assert_eq!(previews.live_count(), 0);
    }

    #[test]
    fn test_foreign_handle_is_ignored() {
        let previews = BlobUrlPreviews::new();
        let file = RawFile::new("a.png", "image/png", vec![0u8; 4]);
        let _kept = previews.create(&file);

        previews.release(PreviewHandle::new("https://cdn.test/a.png"));
        assert_eq!(previews.live_count(), 1);
    }
}
