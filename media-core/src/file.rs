use bytes::Bytes;

/// MIME types accepted when a host does not configure its own list
pub const DEFAULT_IMAGE_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

/// A file handed over by the host (drop or picker selection).
///
/// The handle is immutable once built; cloning only bumps the `Bytes` refcount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    pub content_type: String,
    pub size: u64,
    pub bytes: Bytes,
}

impl RawFile {
    /// Create from in-memory content; the size is taken from the bytes
    pub fn new<N, T, B>(name: N, content_type: T, bytes: B) -> Self
    where
        N: Into<String>,
        T: Into<String>,
        B: Into<Bytes>,
    {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            content_type: content_type.into(),
            size: bytes.len() as u64,
            bytes,
        }
    }

    /// Override the reported size (hosts that stream content lazily)
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Display form of the size, e.g. `"1.5 KB"`
    pub fn formatted_size(&self) -> String {
        format_file_size(self.size)
    }

    pub fn extension(&self) -> Option<&str> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }
}

/// Case-insensitive check of a declared MIME type against an accepted list
pub fn is_accepted_type<S: AsRef<str>>(content_type: &str, accepted: &[S]) -> bool {
    let declared = content_type.trim();
    accepted
        .iter()
        .any(|candidate| candidate.as_ref().trim().eq_ignore_ascii_case(declared))
}

/// Human readable size in base 1024, two decimals at most, capped at MB.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let k = 1024f64;
    let value = bytes as f64;
    let exponent = ((value.ln() / k.ln()).floor() as usize).min(UNITS.len() - 1);
    let scaled = (value / k.powi(exponent as i32) * 100.0).round() / 100.0;

    format!("{} {}", scaled, UNITS[exponent])
}
