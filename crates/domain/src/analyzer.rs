//! Sound Analyzer wire types
//!
//! Typed mirrors of the JSON surface exposed by the Sound Analyzer service,
//! as consumed (not implemented) by this harness. Request payloads serialize
//! to exactly what the service expects; response mirrors deserialize
//! tolerantly, since the harness never fails a case over body shape.

use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON field carrying the upload correlation id in service responses.
pub const UPLOAD_ID_FIELD: &str = "uploadId";

/// A named backend processing phase applied to an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStep {
    /// Scan the uploaded files.
    Scan,
    /// Analyze the scanned files.
    Analyze,
}

impl PipelineStep {
    /// Returns the step as the wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Analyze => "analyze",
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request payload for `POST /api/pipeline`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRequest {
    /// Upload the step applies to.
    pub upload_id: String,
    /// Processing phase to run.
    pub step: PipelineStep,
}

impl PipelineRequest {
    /// Creates a pipeline request for the given upload and step.
    #[must_use]
    pub fn new(upload_id: impl Into<String>, step: PipelineStep) -> Self {
        Self {
            upload_id: upload_id.into(),
            step,
        }
    }
}

/// Request payload for `POST /api/stemmap` (generate action).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StemmapGenerateRequest {
    /// Upload to generate the stemmap for.
    pub upload_id: String,
    /// Wire action discriminator, always "generate".
    pub action: String,
    /// Display title for the generated stemmap.
    pub title: String,
}

impl StemmapGenerateRequest {
    /// Creates a stemmap generation request.
    #[must_use]
    pub fn new(upload_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            upload_id: upload_id.into(),
            action: "generate".to_string(),
            title: title.into(),
        }
    }
}

/// Request payload for `POST /api/export` (export-top action).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportTopRequest {
    /// Upload to export from.
    pub upload_id: String,
    /// Wire action discriminator, always "export-top".
    pub action: String,
    /// Number of top-ranked files to export.
    pub top_n: u32,
}

impl ExportTopRequest {
    /// Creates an export request for the top `top_n` files.
    #[must_use]
    pub fn new(upload_id: impl Into<String>, top_n: u32) -> Self {
        Self {
            upload_id: upload_id.into(),
            action: "export-top".to_string(),
            top_n,
        }
    }
}

impl From<PipelineRequest> for crate::request::RequestBody {
    fn from(req: PipelineRequest) -> Self {
        serde_json::to_value(&req).map_or(Self::None, Self::json)
    }
}

impl From<StemmapGenerateRequest> for crate::request::RequestBody {
    fn from(req: StemmapGenerateRequest) -> Self {
        serde_json::to_value(&req).map_or(Self::None, Self::json)
    }
}

impl From<ExportTopRequest> for crate::request::RequestBody {
    fn from(req: ExportTopRequest) -> Self {
        serde_json::to_value(&req).map_or(Self::None, Self::json)
    }
}

/// Response body of `GET /api/uploads` (list form).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadsListBody {
    /// Known uploads; entries are opaque to the harness.
    #[serde(default)]
    pub uploads: Vec<serde_json::Value>,
}

/// Response body of `GET /api/uploads?uploadId=ID`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadDetailBody {
    /// The requested upload record, when present.
    #[serde(default)]
    pub upload: Option<UploadDetail>,
}

/// Server-side record of a batch of submitted audio files.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct UploadDetail {
    /// Folder name the batch was submitted under.
    #[serde(default)]
    pub folder_name: Option<String>,
    /// Number of files in the batch.
    #[serde(default)]
    pub file_count: Option<u64>,
    /// Total size of the batch in bytes.
    #[serde(default)]
    pub total_size_bytes: Option<u64>,
}

/// Extracts the upload correlation id from a parsed response body.
///
/// The service returns the id as a JSON string; a numeric id is accepted too
/// and stringified.
#[must_use]
pub fn extract_upload_id(body: &serde_json::Value) -> Option<String> {
    match body.get(UPLOAD_ID_FIELD)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
