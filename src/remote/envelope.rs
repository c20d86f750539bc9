//! Response envelope returned by every backend call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    /// Per-record outcomes of create, update and delete calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<RecordResult>>,
}

impl Envelope {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_results(results: Vec<RecordResult>) -> Self {
        Self {
            success: true,
            results: Some(results),
            ..Self::default()
        }
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RecordResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl RecordResult {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn failed(message: Option<String>, errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            data: None,
            message,
            errors,
        }
    }
}

/// Validation failure of a single column.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    #[serde(rename = "fieldLabel", default, skip_serializing_if = "Option::is_none")]
    pub field_label: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl FieldError {
    pub fn new(field_label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_label: Some(field_label.into()),
            message: message.into(),
        }
    }
}
