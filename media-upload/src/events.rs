use chrono::{DateTime, Utc};
use media_core::Media;
use serde::Serialize;

use crate::{BatchId, ItemId, UploadError};

/// Per-item and per-batch notifications from the controller
#[derive(Debug, Clone, Serialize)]
pub enum UploadEvent {
    /// Item created and waiting on transport
    ItemQueued {
        item_id: ItemId,
        batch_id: BatchId,
        file_name: String,
        at: DateTime<Utc>,
    },

    /// Transport stored the file
    ItemSucceeded {
        item_id: ItemId,
        remote_url: String,
        at: DateTime<Utc>,
    },

    /// Transport failed or returned no result for the file
    ItemFailed {
        item_id: ItemId,
        error: String,
        at: DateTime<Utc>,
    },

    /// Item left the visible list; its preview was released
    ItemRemoved {
        item_id: ItemId,
        at: DateTime<Utc>,
    },

    /// Validation rejected a submission before any item was created
    BatchRejected {
        reason: String,
        invalid_count: usize,
        at: DateTime<Utc>,
    },

    /// Persister accepted the records
    Persisted {
        batch_id: BatchId,
        media: Vec<Media>,
        at: DateTime<Utc>,
    },

    /// Batch finished successfully
    BatchCompleted {
        batch_id: BatchId,
        uploaded: usize,
        at: DateTime<Utc>,
    },

    /// Batch finished with an error
    BatchFailed {
        batch_id: BatchId,
        error: String,
        at: DateTime<Utc>,
    },
}

impl UploadEvent {
    pub(crate) fn batch_failed(batch_id: &BatchId, error: &UploadError) -> Self {
        Self::BatchFailed {
            batch_id: batch_id.clone(),
            error: error.to_string(),
            at: Utc::now(),
        }
    }

    /// Get event type name as string
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::ItemQueued { .. } => "item_queued",
            Self::ItemSucceeded { .. } => "item_succeeded",
            Self::ItemFailed { .. } => "item_failed",
            Self::ItemRemoved { .. } => "item_removed",
            Self::BatchRejected { .. } => "batch_rejected",
            Self::Persisted { .. } => "persisted",
            Self::BatchCompleted { .. } => "batch_completed",
            Self::BatchFailed { .. } => "batch_failed",
        }
    }

    /// Item the event refers to, if any
    pub fn item_id(&self) -> Option<&ItemId> {
        match self {
            Self::ItemQueued { item_id, .. }
            | Self::ItemSucceeded { item_id, .. }
            | Self::ItemFailed { item_id, .. }
            | Self::ItemRemoved { item_id, .. } => Some(item_id),
            _ => None,
        }
    }

    /// Get the timestamp from any event
    pub fn timestamp(&self) -> &DateTime<Utc> {
        match self {
            Self::ItemQueued { at, .. }
            | Self::ItemSucceeded { at, .. }
            | Self::ItemFailed { at, .. }
            | Self::ItemRemoved { at, .. }
            | Self::BatchRejected { at, .. }
            | Self::Persisted { at, .. }
            | Self::BatchCompleted { at, .. }
            | Self::BatchFailed { at, .. } => at,
        }
    }
}
