use media_core::{Media, StoredFile};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one upload item, unique for the controller's lifetime
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl ItemId {
    /// Generate a new random item ID
    pub fn new() -> Self {
        Self(format!("upl_{}", Uuid::new_v4().simple()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one submitted batch
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchId(pub String);

impl BatchId {
    pub fn new() -> Self {
        Self(format!("batch_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of one item. `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemStatus {
    Uploading,
    Succeeded { remote_url: String },
    Failed { error: String },
}

impl ItemStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Uploading)
    }

    pub fn remote_url(&self) -> Option<&str> {
        match self {
            Self::Succeeded { remote_url } => Some(remote_url),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }
}

/// Read-only view of an item as the host renders it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSnapshot {
    pub id: ItemId,
    pub batch_id: BatchId,
    pub file_name: String,
    pub size: u64,
    pub formatted_size: String,
    pub preview_url: String,
    pub status: ItemStatus,
}

/// Aggregate result of a batch that completed without error
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// None for an empty submission
    pub batch_id: Option<BatchId>,
    /// Items created for the batch, in drop order
    pub items: Vec<ItemId>,
    /// Transport results, aligned with `items`
    pub uploaded: Vec<StoredFile>,
    /// Records returned by the persister; empty when none is configured
    pub media: Vec<Media>,
}

impl BatchOutcome {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
