use media_core::RawFile;

use crate::{BatchId, ItemId, ItemSnapshot, ItemStatus, PreviewHandle};

/// One file moving through a batch.
///
/// Owns its preview; the handle only leaves through [`UploadItem::into_preview`]
/// so the controller can release it.
#[derive(Debug)]
pub struct UploadItem {
    id: ItemId,
    batch_id: BatchId,
    source: RawFile,
    preview: PreviewHandle,
    status: ItemStatus,
}

impl UploadItem {
    pub(crate) fn new(batch_id: BatchId, source: RawFile, preview: PreviewHandle) -> Self {
        Self {
            id: ItemId::new(),
            batch_id,
            source,
            preview,
            status: ItemStatus::Uploading,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn batch_id(&self) -> &BatchId {
        &self.batch_id
    }

    pub fn source(&self) -> &RawFile {
        &self.source
    }

    pub fn preview_url(&self) -> &str {
        self.preview.url()
    }

    pub fn status(&self) -> &ItemStatus {
        &self.status
    }

    /// Move out of `Uploading`. Terminal items are left untouched.
    pub(crate) fn resolve(&mut self, status: ItemStatus) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = status;
        true
    }

    pub(crate) fn into_preview(self) -> PreviewHandle {
        self.preview
    }

    pub fn snapshot(&self) -> ItemSnapshot {
        ItemSnapshot {
            id: self.id.clone(),
            batch_id: self.batch_id.clone(),
            file_name: self.source.name.clone(),
            size: self.source.size,
            formatted_size: self.source.formatted_size(),
            preview_url: self.preview.url().to_string(),
            status: self.status.clone(),
        }
    }
}
