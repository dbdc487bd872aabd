use media_core::DEFAULT_IMAGE_TYPES;
use serde::Deserialize;

/// Configuration for upload batches
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest single file accepted (bytes)
    pub max_file_bytes: u64,

    /// Declared MIME types a file may carry
    pub accepted_types: Vec<String>,

    /// If false, a batch may hold one file only
    pub multiple: bool,

    /// Folder label stamped on persisted records
    pub folder: String,

    /// Kind stamped on persisted records
    pub media_kind: String,

    /// Buffered events per subscriber before lagging
    pub event_capacity: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 2 * 1024 * 1024, // 2MiB
            accepted_types: DEFAULT_IMAGE_TYPES.iter().map(|t| t.to_string()).collect(),
            multiple: true,
            folder: "media".to_string(),
            media_kind: "image".to_string(),
            event_capacity: 256,
        }
    }
}

impl UploadConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max file size
    pub fn with_max_file_bytes(mut self, bytes: u64) -> Self {
        self.max_file_bytes = bytes;
        self
    }

    /// Replace the accepted MIME types
    pub fn with_accepted_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict batches to a single file
    pub fn single_file(mut self) -> Self {
        self.multiple = false;
        self
    }

    /// Set target folder
    pub fn with_folder<S: Into<String>>(mut self, folder: S) -> Self {
        self.folder = folder.into();
        self
    }

    pub fn with_media_kind<S: Into<String>>(mut self, kind: S) -> Self {
        self.media_kind = kind.into();
        self
    }

    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Check a declared MIME type against the accepted list
    pub fn accepts(&self, content_type: &str) -> bool {
        media_core::is_accepted_type(content_type, &self.accepted_types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UploadConfig::default();
        assert_eq!(config.max_file_bytes, 2_097_152);
        assert!(config.multiple);
        assert_eq!(config.folder, "media");
        assert!(config.accepts("image/png"));
        assert!(config.accepts("image/jpeg"));
        assert!(config.accepts("image/jpg"));
        assert!(!config.accepts("image/gif"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: UploadConfig =
            serde_json::from_str(r#"{ "folder": "avatars", "multiple": false }"#).unwrap();
        assert_eq!(config.folder, "avatars");
        assert!(!config.multiple);
        assert_eq!(config.max_file_bytes, 2 * 1024 * 1024);
        assert_eq!(config.accepted_types.len(), 3);
    }

    #[test]
    fn test_builder() {
        let config = UploadConfig::new()
            .with_accepted_types(["image/webp"])
            .with_max_file_bytes(10)
            .single_file()
            .with_folder("banners");
        assert!(config.accepts("IMAGE/WEBP"));
        assert!(!config.accepts("image/png"));
        assert_eq!(config.max_file_bytes, 10);
        assert!(!config.multiple);
        assert_eq!(config.folder, "banners");
    }
}
