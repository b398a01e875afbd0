//! HTTP Request body types

use serde::{Deserialize, Serialize};

/// A named text field of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextField {
    /// Form field name
    pub name: String,
    /// Field value
    pub value: String,
}

impl TextField {
    /// Creates a new text field.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A file part of a multipart form, carried in memory.
///
/// The MIME type is derived from the file name when the form is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePart {
    /// Form field name (e.g. "files")
    pub name: String,
    /// File name sent with the part
    pub file_name: String,
    /// Raw file bytes
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Creates a new in-memory file part.
    #[must_use]
    pub fn new(name: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// HTTP request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// JSON body
    Json {
        /// The JSON payload
        value: serde_json::Value,
    },
    /// Multipart form data with text fields and in-memory file parts
    Multipart {
        /// Text fields of the form
        fields: Vec<TextField>,
        /// File parts of the form
        files: Vec<FilePart>,
    },
}

impl RequestBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Creates a JSON body.
    #[must_use]
    pub const fn json(value: serde_json::Value) -> Self {
        Self::Json { value }
    }

    /// Creates a multipart body.
    #[must_use]
    pub const fn multipart(fields: Vec<TextField>, files: Vec<FilePart>) -> Self {
        Self::Multipart { fields, files }
    }

    /// Returns whether the body is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Json { value } => value.is_null(),
            Self::Multipart { fields, files } => fields.is_empty() && files.is_empty(),
        }
    }

    /// Returns the content type if applicable.
    ///
    /// Multipart bodies have no fixed content type here; the boundary is
    /// chosen by the HTTP client when the form is assembled.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::None | Self::Multipart { .. } => None,
            Self::Json { .. } => Some("application/json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_body() {
        let body = RequestBody::json(serde_json::json!({"key": "value"}));
        assert_eq!(body.content_type(), Some("application/json"));
        assert!(!body.is_empty());
    }

    #[test]
    fn test_empty_body() {
        let body = RequestBody::none();
        assert!(body.is_empty());
        assert_eq!(body.content_type(), None);
    }

    #[test]
    fn test_multipart_body() {
        let body = RequestBody::multipart(
            vec![TextField::new("folderName", "Test_Pack_120000")],
            vec![FilePart::new(
                "files",
                "test_audio.wav",
                vec![0x52, 0x49, 0x46, 0x46],
            )],
        );
        assert!(!body.is_empty());
        assert_eq!(body.content_type(), None);
    }
}
