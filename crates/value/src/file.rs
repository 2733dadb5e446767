//! File metadata carried by file inputs.

use serde::{Deserialize, Serialize};

/// A file selected in a file input.
///
/// Only metadata is kept; the bytes stay with whoever owns the form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileHandle {
    /// File name without directory components.
    pub name: String,

    /// Size in bytes.
    #[serde(default)]
    pub size: u64,

    /// MIME type, empty when the host could not determine one.
    #[serde(default, rename = "type")]
    pub mime_type: String,

    /// Last modification time in milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<i64>,
}

impl FileHandle {
    /// Creates a handle with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 0,
            mime_type: String::new(),
            last_modified: None,
        }
    }

    /// Sets the size in bytes.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Sets the MIME type.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Sets the modification timestamp.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_last_modified(mut self, millis: i64) -> Self {
        self.last_modified = Some(millis);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_browser_field_names() {
        let file = FileHandle::new("cv.pdf")
            .with_size(1024)
            .with_mime_type("application/pdf")
            .with_last_modified(1_700_000_000_000);

        assert_eq!(
            serde_json::to_value(&file).unwrap(),
            json!({
                "name": "cv.pdf",
                "size": 1024,
                "type": "application/pdf",
                "lastModified": 1_700_000_000_000_i64,
            })
        );
    }

    #[test]
    fn deserializes_with_defaults() {
        let file: FileHandle = serde_json::from_value(json!({ "name": "a.txt" })).unwrap();
        assert_eq!(file, FileHandle::new("a.txt"));
    }
}
