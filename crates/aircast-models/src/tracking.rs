//! Multi-object tracking bundle models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-camera continuity signal from the tracking collaborator.
///
/// Absent when the tracker is disabled or produced nothing for the tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TrackingBundle {
    /// Number of active tracks in this camera
    pub track_count: u32,

    /// Whether the broadcast main subject is visible in this camera
    pub main_subject_present: bool,

    /// Track ID of the main subject, if identified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_subject_id: Option<u64>,

    /// Tracklet stability for the main subject (0.0-1.0)
    pub continuity_score: f64,
}

impl TrackingBundle {
    /// Bundle reporting a stable, visible main subject.
    pub fn with_main_subject(id: u64, continuity_score: f64, track_count: u32) -> Self {
        Self {
            track_count,
            main_subject_present: true,
            main_subject_id: Some(id),
            continuity_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reports_nothing_tracked() {
        let tracking = TrackingBundle::default();
        assert_eq!(tracking.track_count, 0);
        assert!(!tracking.main_subject_present);
        assert!(tracking.main_subject_id.is_none());
    }

    #[test]
    fn test_absent_id_skipped_in_json() {
        let json = serde_json::to_string(&TrackingBundle::default()).unwrap();
        assert!(!json.contains("main_subject_id"));

        let json = serde_json::to_string(&TrackingBundle::with_main_subject(7, 0.8, 3)).unwrap();
        assert!(json.contains("\"main_subject_id\":7"));
    }
}
