use media_core::Media;
use thiserror::Error;

/// Result type for upload operations
pub type UploadResult<T> = Result<T, UploadError>;

/// Errors reported for an upload batch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Batch rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("Upload failed: {message}")]
    Transport { message: String },

    /// `media` holds the records saved for the files that did upload
    #[error("Upload incomplete: {received} of {expected} file(s) returned a result")]
    IncompleteUpload {
        expected: usize,
        received: usize,
        media: Vec<Media>,
    },

    #[error("Saving media failed: {message}")]
    Persistence { message: String },
}

/// Why a batch was rejected before anything was uploaded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{invalid_count} file(s) have invalid type")]
    UnacceptedType { invalid_count: usize },

    #[error("{invalid_count} file(s) exceed the {max_bytes} byte limit")]
    TooLarge { invalid_count: usize, max_bytes: u64 },

    #[error("only one file may be uploaded at a time, got {count}")]
    TooManyFiles { count: usize },
}

impl UploadError {
    /// Create a transport error from a collaborator failure
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a persistence error from a collaborator failure
    pub fn persistence<S: Into<String>>(message: S) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl ValidationError {
    /// Number of files that caused the rejection
    pub fn invalid_count(&self) -> usize {
        match self {
            Self::UnacceptedType { invalid_count } | Self::TooLarge { invalid_count, .. } => {
                *invalid_count
            }
            Self::TooManyFiles { count } => *count,
        }
    }
}
