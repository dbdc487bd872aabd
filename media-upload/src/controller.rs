use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use media_core::{CreateMedia, Media, RawFile, StoredFile};
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

use crate::{
    BatchId, BatchOutcome, BlobUrlPreviews, ItemId, ItemSnapshot, ItemStatus, MediaPersister,
    PreviewProvider, UploadConfig, UploadError, UploadEvent, UploadItem, UploadResult,
    UploadTransport, ValidationError,
};

/// Called with the persisted records of a successful batch
pub type SuccessCallback = Arc<dyn Fn(&[Media]) + Send + Sync>;

/// Called once with the error of a failed batch
pub type ErrorCallback = Arc<dyn Fn(&UploadError) + Send + Sync>;

const MISSING_RESULT: &str = "No upload result returned for this file";

/// Drives batches of files through upload and persistence and keeps the
/// list of items the host displays.
///
/// Several batches may be in flight at once; every status update is keyed by
/// the item id captured at submission, and no lock is held across an await.
pub struct UploadBatchController {
    transport: Arc<dyn UploadTransport>,
    persister: Option<Arc<dyn MediaPersister>>,
    previews: Arc<dyn PreviewProvider>,
    config: UploadConfig,
    /// Most recent batch first
    items: RwLock<Vec<UploadItem>>,
    in_flight: AtomicUsize,
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
    events: broadcast::Sender<UploadEvent>,
}

/// Counts a batch as in flight until dropped
struct InFlightGuard<'a>(&'a AtomicUsize);

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl UploadBatchController {
    /// Create a controller around a transport
    pub fn new<T: UploadTransport + 'static>(transport: T, config: UploadConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));

        Self {
            transport: Arc::new(transport),
            persister: None,
            previews: Arc::new(BlobUrlPreviews::new()),
            config,
            items: RwLock::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            on_success: None,
            on_error: None,
            events,
        }
    }

    /// Persist metadata for uploaded files
    pub fn with_persister<P: MediaPersister + 'static>(mut self, persister: P) -> Self {
        self.persister = Some(Arc::new(persister));
        self
    }

    /// Replace the default blob URL preview pool
    pub fn with_previews<P: PreviewProvider + 'static>(mut self, previews: P) -> Self {
        self.previews = Arc::new(previews);
        self
    }

    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: Fn(&[Media]) + Send + Sync + 'static,
    {
        self.on_success = Some(Arc::new(callback));
        self
    }

    pub fn on_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(&UploadError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(callback));
        self
    }

    /// Submit one drop/selection of files.
    ///
    /// Validation failures return immediately and create no items. Every
    /// other outcome is reported exactly once: through `on_success` /
    /// `on_error`, a batch event, and the returned result.
    #[instrument(skip(self, files), fields(files = files.len()))]
    pub async fn submit_batch(&self, files: Vec<RawFile>) -> UploadResult<BatchOutcome> {
        if files.is_empty() {
            debug!("Ignoring empty batch");
            return Ok(BatchOutcome::default());
        }

        if let Err(rejection) = self.validate(&files) {
            warn!("Batch rejected: {}", rejection);
            self.emit(UploadEvent::BatchRejected {
                reason: rejection.to_string(),
                invalid_count: rejection.invalid_count(),
                at: Utc::now(),
            });
            return Err(rejection.into());
        }

        let _in_flight = InFlightGuard::enter(&self.in_flight);
        let batch_id = BatchId::new();
        let item_ids = self.enqueue_items(&batch_id, &files);
        info!(batch_id = %batch_id, "Uploading {} file(s)", files.len());

        match self.run_batch(&batch_id, &item_ids, &files).await {
            Ok(outcome) => {
                info!(
                    batch_id = %batch_id,
                    uploaded = outcome.uploaded.len(),
                    persisted = outcome.media.len(),
                    "Batch completed"
                );
                if self.persister.is_some() {
                    if let Some(callback) = &self.on_success {
                        callback(&outcome.media);
                    }
                }
                self.emit(UploadEvent::BatchCompleted {
                    batch_id,
                    uploaded: outcome.uploaded.len(),
                    at: Utc::now(),
                });
                Ok(outcome)
            }
            Err(error) => {
                warn!(batch_id = %batch_id, "Batch failed: {}", error);
                if let Some(callback) = &self.on_error {
                    callback(&error);
                }
                self.emit(UploadEvent::batch_failed(&batch_id, &error));
                Err(error)
            }
        }
    }

    /// Transport then persistence for one batch. Items are already visible.
    async fn run_batch(
        &self,
        batch_id: &BatchId,
        item_ids: &[ItemId],
        files: &[RawFile],
    ) -> UploadResult<BatchOutcome> {
        let results = match self.transport.upload(files).await {
            Ok(results) => results,
            Err(e) => {
                let message = e.to_string();
                for id in item_ids {
                    self.resolve(id, ItemStatus::Failed { error: message.clone() });
                }
                return Err(UploadError::transport(message));
            }
        };

        if results.len() > files.len() {
            warn!(
                batch_id = %batch_id,
                "Transport returned {} results for {} files, ignoring the extra",
                results.len(),
                files.len()
            );
        }

        let mut uploaded: Vec<StoredFile> = Vec::with_capacity(files.len());
        for (position, id) in item_ids.iter().enumerate() {
            match results.get(position) {
                Some(stored) => {
                    self.resolve(
                        id,
                        ItemStatus::Succeeded {
                            remote_url: stored.url.clone(),
                        },
                    );
                    uploaded.push(stored.clone());
                }
                None => {
                    self.resolve(
                        id,
                        ItemStatus::Failed {
                            error: MISSING_RESULT.to_string(),
                        },
                    );
                }
            }
        }

        let media = match &self.persister {
            Some(persister) if !uploaded.is_empty() => {
                let records: Vec<CreateMedia> = uploaded
                    .iter()
                    .map(|stored| {
                        CreateMedia::from_stored(stored, &self.config.media_kind, &self.config.folder)
                    })
                    .collect();

                debug!(batch_id = %batch_id, "Saving {} media record(s)", records.len());
                // Uploaded files are not removed when this fails
                let media = persister
                    .save(records)
                    .await
                    .map_err(|e| UploadError::persistence(e.to_string()))?;

                self.emit(UploadEvent::Persisted {
                    batch_id: batch_id.clone(),
                    media: media.clone(),
                    at: Utc::now(),
                });
                media
            }
            _ => Vec::new(),
        };

        if uploaded.len() < files.len() {
            return Err(UploadError::IncompleteUpload {
                expected: files.len(),
                received: uploaded.len(),
                media,
            });
        }

        Ok(BatchOutcome {
            batch_id: Some(batch_id.clone()),
            items: item_ids.to_vec(),
            uploaded,
            media,
        })
    }

    /// All-or-nothing checks: type, then size, then multiplicity
    fn validate(&self, files: &[RawFile]) -> Result<(), ValidationError> {
        let invalid_type = files
            .iter()
            .filter(|file| !self.config.accepts(&file.content_type))
            .count();
        if invalid_type > 0 {
            return Err(ValidationError::UnacceptedType {
                invalid_count: invalid_type,
            });
        }

        let too_large = files
            .iter()
            .filter(|file| file.size > self.config.max_file_bytes)
            .count();
        if too_large > 0 {
            return Err(ValidationError::TooLarge {
                invalid_count: too_large,
                max_bytes: self.config.max_file_bytes,
            });
        }

        if !self.config.multiple && files.len() > 1 {
            return Err(ValidationError::TooManyFiles { count: files.len() });
        }

        Ok(())
    }

    /// Create items in drop order and prepend them to the visible list
    fn enqueue_items(&self, batch_id: &BatchId, files: &[RawFile]) -> Vec<ItemId> {
        let new_items: Vec<UploadItem> = files
            .iter()
            .map(|file| UploadItem::new(batch_id.clone(), file.clone(), self.previews.create(file)))
            .collect();
        let queued: Vec<(ItemId, String)> = new_items
            .iter()
            .map(|item| (item.id().clone(), item.source().name.clone()))
            .collect();

        {
            let mut items = self.items.write();
            let previous = std::mem::replace(&mut *items, new_items);
            items.extend(previous);
        }

        // Items are visible before anyone hears about them
        for (item_id, file_name) in &queued {
            self.emit(UploadEvent::ItemQueued {
                item_id: item_id.clone(),
                batch_id: batch_id.clone(),
                file_name: file_name.clone(),
                at: Utc::now(),
            });
        }

        queued.into_iter().map(|(id, _)| id).collect()
    }

    /// Apply a terminal status to an item still in the list
    fn resolve(&self, id: &ItemId, status: ItemStatus) {
        let applied = {
            let mut items = self.items.write();
            match items.iter_mut().find(|item| item.id() == id) {
                Some(item) => item.resolve(status.clone()),
                None => false,
            }
        };

        if !applied {
            debug!(item_id = %id, "Item removed or already resolved, dropping status update");
            return;
        }

        let event = match status {
            ItemStatus::Succeeded { remote_url } => UploadEvent::ItemSucceeded {
                item_id: id.clone(),
                remote_url,
                at: Utc::now(),
            },
            ItemStatus::Failed { error } => UploadEvent::ItemFailed {
                item_id: id.clone(),
                error,
                at: Utc::now(),
            },
            ItemStatus::Uploading => return,
        };
        self.emit(event);
    }

    /// Remove an item and release its preview. Returns false if unknown.
    pub fn remove(&self, id: &ItemId) -> bool {
        let removed = {
            let mut items = self.items.write();
            items
                .iter()
                .position(|item| item.id() == id)
                .map(|index| items.remove(index))
        };

        match removed {
            Some(item) => {
                self.previews.release(item.into_preview());
                self.emit(UploadEvent::ItemRemoved {
                    item_id: id.clone(),
                    at: Utc::now(),
                });
                true
            }
            None => false,
        }
    }

    /// Remove every item, in flight or not
    pub fn clear(&self) {
        let drained = std::mem::take(&mut *self.items.write());
        for item in drained {
            let id = item.id().clone();
            self.previews.release(item.into_preview());
            self.emit(UploadEvent::ItemRemoved {
                item_id: id,
                at: Utc::now(),
            });
        }
    }

    /// Snapshot of the visible list, most recent first
    pub fn items(&self) -> Vec<ItemSnapshot> {
        self.items.read().iter().map(UploadItem::snapshot).collect()
    }

    pub fn item(&self, id: &ItemId) -> Option<ItemSnapshot> {
        self.items
            .read()
            .iter()
            .find(|item| item.id() == id)
            .map(UploadItem::snapshot)
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Batches between item creation and their outcome
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_uploading(&self) -> bool {
        self.in_flight() > 0
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Subscribe to item and batch events
    pub fn subscribe(&self) -> broadcast::Receiver<UploadEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: UploadEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

impl Drop for UploadBatchController {
    fn drop(&mut self) {
        let remaining = std::mem::take(self.items.get_mut());
        if !remaining.is_empty() {
            debug!("Releasing {} preview(s) on teardown", remaining.len());
        }
        for item in remaining {
            self.previews.release(item.into_preview());
        }
    }
}
