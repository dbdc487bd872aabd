//! # media-upload: batch upload controller for media records
//!
//! `media-upload` owns the lifecycle of files a user drops into an uploader:
//! validation, a single transport call per batch, optional metadata
//! persistence, per-item status, and release of transient previews.
//!
//! Storage and database are collaborators the host plugs in:
//!
//! ```text
//! ┌─────────────────────────┐
//! │     Host uploader UI    │  ← renders items, shows notifications
//! ├─────────────────────────┤
//! │  UploadBatchController  │  ← validation, item state, batch outcome
//! ├────────────┬────────────┤
//! │  Transport │  Persister │  ← S3/Cloudinary, database
//! └────────────┴────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use media_upload::prelude::*;
//! use media_core::{Media, MediaId};
//!
//! struct Cdn;
//!
//! #[async_trait::async_trait]
//! impl UploadTransport for Cdn {
//!     async fn upload(&self, files: &[RawFile]) -> anyhow::Result<Vec<StoredFile>> {
//!         Ok(files
//!             .iter()
//!             .map(|f| StoredFile::new(format!("https://cdn.example.com/{}", f.name), f.name.clone()))
//!             .collect())
//!     }
//! }
//!
//! struct Db;
//!
//! #[async_trait::async_trait]
//! impl MediaPersister for Db {
//!     async fn save(&self, records: Vec<CreateMedia>) -> anyhow::Result<Vec<Media>> {
//!         Ok(records.into_iter().map(|r| Media::from_create(MediaId::new(), r)).collect())
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> UploadResult<()> {
//! let uploader = UploadBatchController::new(Cdn, UploadConfig::default().with_folder("avatars"))
//!     .with_persister(Db);
//!
//! let outcome = uploader
//!     .submit_batch(vec![RawFile::new("me.png", "image/png", vec![0u8; 128])])
//!     .await?;
//!
//! assert_eq!(outcome.media[0].folder, "avatars");
//! assert!(uploader.items()[0].status.remote_url().is_some());
//! # Ok(())
//! # }
//! ```

mod config;
mod controller;
mod error;
mod events;
mod item;
pub mod preview;
pub mod store;
mod types;

pub use config::UploadConfig;
pub use controller::{ErrorCallback, SuccessCallback, UploadBatchController};
pub use error::{UploadError, UploadResult, ValidationError};
pub use events::UploadEvent;
pub use item::UploadItem;
pub use preview::{BlobUrlPreviews, PreviewHandle, PreviewProvider};
pub use store::{MediaPersister, UploadTransport};
pub use types::{BatchId, BatchOutcome, ItemId, ItemSnapshot, ItemStatus};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BatchOutcome, ItemStatus, MediaPersister, UploadBatchController, UploadConfig,
        UploadError, UploadResult, UploadTransport,
    };
    pub use media_core::{CreateMedia, RawFile, StoredFile};
}
