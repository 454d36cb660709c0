use serde::Serialize;

/// JSON body for every non-2xx answer of the API.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable, machine-readable error code (e.g. "MISSING_FIELD").
    pub error: &'static str,
    /// Human-friendly error message.
    pub message: String,
    /// Optional fine-grained error details (per-field, hints, etc.).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetail>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Field path like `data` or `data.prompt`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Optional hint to help the client fix the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorBody {
    pub fn new(error: &'static str, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: ErrorDetail) -> Self {
        if detail.path.is_some() || detail.hint.is_some() {
            self.details.push(detail);
        }
        self
    }
}
