//! Camera identifiers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque stable identifier for a physical or logical camera feed.
///
/// Unique among the candidates evaluated in a single tick. The engine never
/// generates these; they come from the ingestion layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct CameraId(pub String);

impl CameraId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CameraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CameraId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CameraId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_id_transparent_serde() {
        let id = CameraId::from("cam1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"cam1\"");

        let decoded: CameraId = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, id);
        assert_eq!(decoded.as_str(), "cam1");
    }
}
