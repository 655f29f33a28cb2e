//! Vision-language scene bundle models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lowest interest grade the scene model can assign.
pub const INTEREST_SCORE_MIN: u8 = 1;

/// Highest interest grade the scene model can assign.
pub const INTEREST_SCORE_MAX: u8 = 5;

/// Per-camera output of the vision-language collaborator.
///
/// The scene model is interval-gated upstream, so this bundle is absent on
/// most ticks; the engine treats absence as zero interest, never as an error.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SceneBundle {
    /// Short descriptive tags for the scene
    pub tags: Vec<String>,

    /// One-line caption
    pub caption: String,

    /// Broadcast-interest grade, 1 (dull) to 5 (must-show)
    pub interest_score: u8,

    /// Coarse scene classification (e.g. "indoor", "stage")
    pub scene_type: String,

    /// Coarse activity classification (e.g. "low", "high")
    pub activity_level: String,
}

impl SceneBundle {
    /// Create a bundle with a caption and interest grade; tags and
    /// classifications can be filled in afterwards.
    pub fn new(caption: impl Into<String>, interest_score: u8) -> Self {
        Self {
            tags: Vec::new(),
            caption: caption.into(),
            interest_score: interest_score.clamp(INTEREST_SCORE_MIN, INTEREST_SCORE_MAX),
            scene_type: String::new(),
            activity_level: String::new(),
        }
    }

    /// Set the scene tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the scene type.
    pub fn with_scene_type(mut self, scene_type: impl Into<String>) -> Self {
        self.scene_type = scene_type.into();
        self
    }

    /// Set the activity level.
    pub fn with_activity_level(mut self, activity_level: impl Into<String>) -> Self {
        self.activity_level = activity_level.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interest_score_clamped_at_construction() {
        assert_eq!(SceneBundle::new("x", 0).interest_score, 1);
        assert_eq!(SceneBundle::new("x", 3).interest_score, 3);
        assert_eq!(SceneBundle::new("x", 9).interest_score, 5);
    }

    #[test]
    fn test_builder_chain() {
        let scene = SceneBundle::new("crowd cheering near the stage", 4)
            .with_tags(vec!["crowd".to_string(), "stage".to_string()])
            .with_scene_type("concert")
            .with_activity_level("high");
        assert_eq!(scene.tags.len(), 2);
        assert_eq!(scene.scene_type, "concert");
        assert_eq!(scene.activity_level, "high");
    }
}
