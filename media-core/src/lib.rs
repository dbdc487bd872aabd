//! media-core: shared records for the media upload toolkit.
//!
//! The types here are what flows between a host application and its
//! collaborators: the raw file a user dropped, the `{url, name}` a storage
//! provider hands back, and the media records a database layer persists.
//!
//! ```rust
//! use media_core::{format_file_size, CreateMedia, RawFile, StoredFile};
//!
//! let file = RawFile::new("cat.png", "image/png", vec![0u8; 1536]);
//! assert_eq!(format_file_size(file.size), "1.5 KB");
//!
//! let stored = StoredFile::new("https://cdn.example.com/cat.png", "cat.png");
//! let record = CreateMedia::from_stored(&stored, "image", "media");
//! assert!(record.title.is_none());
//! ```

pub mod file;
pub mod media;

pub use file::{format_file_size, is_accepted_type, RawFile, DEFAULT_IMAGE_TYPES};
pub use media::{CreateMedia, Media, MediaId, StoredFile};
