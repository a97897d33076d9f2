//! Parsed root → text projections.

use crate::error::SerializeError;
use serde_json::Value;

/// Pretty-printed JSON (2-space indent) of the selected root.
pub fn to_json_pretty(root: &Value) -> Result<String, SerializeError> {
    serde_json::to_string_pretty(root).map_err(|e| SerializeError {
        message: format!("failed to serialize to JSON: {}", e),
    })
}

/// Serialize the selected root back to YAML.
pub fn to_yaml(root: &Value) -> Result<String, SerializeError> {
    serde_saphyr::to_string(root).map_err(|e| SerializeError {
        message: format!("failed to serialize to YAML: {}", e),
    })
}
