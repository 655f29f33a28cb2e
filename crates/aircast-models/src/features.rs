//! Normalized feature vector models.
//!
//! The nine scored components live in a fixed, documented order that both
//! scoring backends consume. Raw pass-through fields ride along for
//! explanation and debugging only and never enter a score.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of scored components.
pub const FEATURE_COUNT: usize = 9;

/// Component names in scoring order. Model artifacts are trained against
/// this order; changing it invalidates every trained artifact.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "face_salience",
    "main_subject_overlap",
    "motion_salience",
    "speech_energy",
    "keyword_boost",
    "framing_score",
    "novelty_decay",
    "continuity_bonus",
    "vlm_interest",
];

/// Normalized per-camera feature vector.
///
/// Every scored component is clamped to [0, 1] regardless of input
/// magnitude.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FeatureVector {
    /// Face confidence/area blend
    pub face_salience: f64,

    /// Consistency with the tracked or remembered main subject
    pub main_subject_overlap: f64,

    /// Velocity-derived motion level
    pub motion_salience: f64,

    /// Speech energy mapped from dB
    pub speech_energy: f64,

    /// Boost from spotted keywords
    pub keyword_boost: f64,

    /// Frame-occupancy quality
    pub framing_score: f64,

    /// Reward for time spent off-air
    pub novelty_decay: f64,

    /// Active-camera and tracklet-stability blend
    pub continuity_bonus: f64,

    /// Vision-language interest grade, rescaled
    pub vlm_interest: f64,

    // Raw values for explanation/debugging, not scored.
    /// Count of detections per class label
    pub object_counts: BTreeMap<String, u32>,

    /// Keyword strings from the audio bundle
    pub keywords: Vec<String>,

    /// Mean detection velocity in px/s
    pub avg_velocity: f64,

    /// Highest detection velocity in px/s
    pub max_velocity: f64,

    /// Active track count from the tracking bundle
    pub track_count: u32,
}

impl FeatureVector {
    /// The scored components in the fixed [`FEATURE_NAMES`] order.
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.face_salience,
            self.main_subject_overlap,
            self.motion_salience,
            self.speech_energy,
            self.keyword_boost,
            self.framing_score,
            self.novelty_decay,
            self.continuity_bonus,
            self.vlm_interest,
        ]
    }

    /// Whether every scored component is inside [0, 1].
    pub fn is_normalized(&self) -> bool {
        self.as_array()
            .iter()
            .all(|v| v.is_finite() && (0.0..=1.0).contains(v))
    }
}
