//! Score result and pub/sub message models.
//!
//! The `SCORE` envelope keeps wire compatibility with the existing
//! downstream consumers; field names here are load-bearing.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::camera::CameraId;
use crate::features::FeatureVector;

/// Which scoring backend produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum ScoringMethod {
    /// Deterministic weighted sum
    #[default]
    #[serde(rename = "rule-based")]
    RuleBased,

    /// Pluggable trained model
    #[serde(rename = "model")]
    Model,
}

impl ScoringMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMethod::RuleBased => "rule-based",
            ScoringMethod::Model => "model",
        }
    }
}

impl fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-camera per-tick ranking outcome.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScoreResult {
    /// Camera that was evaluated
    pub camera_id: CameraId,

    /// Evaluation time
    pub timestamp: DateTime<Utc>,

    /// Fused broadcast-worthiness score
    pub score: f64,

    /// Normalized feature breakdown behind the score
    pub features: FeatureVector,

    /// Human-readable justification
    pub reason: String,

    /// Backend that produced the score
    pub method: ScoringMethod,

    /// Scene tags carried through for downstream display
    pub vlm_tags: Vec<String>,

    /// Scene caption carried through for downstream display
    pub vlm_caption: String,

    /// Whether a tracking bundle with at least one track was supplied
    pub tracking_present: bool,
}

/// Message envelope published to the scores channel.
///
/// Serializes as `{"type": "SCORE", "payload": {...}}` and must round-trip
/// unchanged through serde_json.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum ScoreMessage {
    #[serde(rename = "SCORE")]
    Score { payload: ScoreResult },
}

impl ScoreMessage {
    pub fn new(payload: ScoreResult) -> Self {
        Self::Score { payload }
    }

    pub fn payload(&self) -> &ScoreResult {
        match self {
            Self::Score { payload } => payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> ScoreResult {
        ScoreResult {
            camera_id: CameraId::from("cam2"),
            timestamp: Utc::now(),
            score: 0.47,
            features: FeatureVector::default(),
            reason: "face visible + speech detected".to_string(),
            method: ScoringMethod::RuleBased,
            vlm_tags: vec!["stage".to_string()],
            vlm_caption: "a speaker on stage".to_string(),
            tracking_present: true,
        }
    }

    #[test]
    fn test_method_wire_names() {
        assert_eq!(
            serde_json::to_string(&ScoringMethod::RuleBased).unwrap(),
            "\"rule-based\""
        );
        assert_eq!(serde_json::to_string(&ScoringMethod::Model).unwrap(), "\"model\"");
    }

    #[test]
    fn test_score_message_envelope_shape() {
        let msg = ScoreMessage::new(sample_result());
        let value = serde_json::to_value(&msg).unwrap();

        assert_eq!(value["type"], "SCORE");
        assert_eq!(value["payload"]["camera_id"], "cam2");
        assert_eq!(value["payload"]["method"], "rule-based");
        assert_eq!(value["payload"]["reason"], "face visible + speech detected");
    }

    #[test]
    fn test_score_message_roundtrip() {
        let msg = ScoreMessage::new(sample_result());
        let json = serde_json::to_string(&msg).unwrap();
        let decoded: ScoreMessage = serde_json::from_str(&json).unwrap();

        let payload = decoded.payload();
        assert_eq!(payload.camera_id, CameraId::from("cam2"));
        assert!((payload.score - 0.47).abs() < 1e-9);
        assert_eq!(payload.method, ScoringMethod::RuleBased);
        assert_eq!(payload.vlm_tags, vec!["stage".to_string()]);
        assert!(payload.tracking_present);

        // Re-encoding must not drift.
        assert_eq!(json, serde_json::to_string(&decoded).unwrap());
    }
}
