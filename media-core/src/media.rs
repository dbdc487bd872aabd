use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-assigned identifier of a persisted media record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(pub String);

impl MediaId {
    /// Generate a random id (in-memory persisters, fixtures)
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from existing string
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MediaId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MediaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a storage provider returns for one uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub url: String,
    pub name: String,
}

impl StoredFile {
    pub fn new<U: Into<String>, N: Into<String>>(url: U, name: N) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }
}

/// Metadata record handed to the persistence layer after a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMedia {
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub folder: String,
}

impl CreateMedia {
    /// Build the record for a freshly uploaded file; title and description start empty
    pub fn from_stored<K: Into<String>, F: Into<String>>(stored: &StoredFile, kind: K, folder: F) -> Self {
        Self {
            name: stored.name.clone(),
            title: None,
            description: None,
            url: stored.url.clone(),
            kind: kind.into(),
            folder: folder.into(),
        }
    }
}

/// A persisted media record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: MediaId,
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub folder: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Media {
    /// Materialize a create request with the given id, stamped now
    pub fn from_create(id: MediaId, create: CreateMedia) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: create.name,
            title: create.title,
            description: create.description,
            url: create.url,
            kind: create.kind,
            folder: create.folder,
            created_at: now,
            updated_at: now,
        }
    }

    /// Title when set, otherwise the file name
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_media_wire_shape() {
        let stored = StoredFile::new("https://cdn.test/a.png", "a.png");
        let create = CreateMedia::from_stored(&stored, "image", "media");

        let json = serde_json::to_value(&create).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["folder"], "media");
        assert!(json["title"].is_null());
        assert!(json["description"].is_null());
        assert_eq!(json["url"], "https://cdn.test/a.png");
    }

    #[test]
    fn test_media_from_create() {
        let stored = StoredFile::new("u1", "a.png");
        let media = Media::from_create(
            MediaId::from_string("m-1".to_string()),
            CreateMedia::from_stored(&stored, "image", "avatars"),
        );

        assert_eq!(media.id.as_str(), "m-1");
        assert_eq!(media.folder, "avatars");
        assert_eq!(media.created_at, media.updated_at);
        assert_eq!(media.display_name(), "a.png");

        let json = serde_json::to_value(&media).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["id"], "m-1");
    }
}
