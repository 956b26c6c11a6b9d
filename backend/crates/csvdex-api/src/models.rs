//! Response bodies.

use serde::{Deserialize, Serialize};

/// Body of every non-2xx JSON response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            key: None,
        }
    }

    /// The query named no searchable column.
    pub fn invalid_parameters(searchable: &[String]) -> Self {
        let columns = serde_json::to_string(searchable).unwrap_or_default();
        Self::new(format!("Invalid parameters, try with {}", columns))
    }

    pub fn not_found(key: &str) -> Self {
        Self {
            error: "Not found".to_string(),
            key: Some(key.to_string()),
        }
    }
}

/// Liveness probe body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok_with_version(version: &str) -> Self {
        Self {
            status: "healthy".to_string(),
            version: version.to_string(),
        }
    }
}
