//! Human-readable score justifications.
//!
//! Deterministic, order-preserving clause concatenation so downstream
//! operators see stable, comparable reasons tick over tick.

use aircast_models::{FeatureVector, SceneBundle};

/// Delimiter between triggered clauses.
pub const REASON_DELIMITER: &str = " + ";

/// Clause emitted when nothing else triggers.
pub const FALLBACK_REASON: &str = "general scene";

const FACE_THRESHOLD: f64 = 0.6;
const MOTION_THRESHOLD: f64 = 0.5;
const SPEECH_THRESHOLD: f64 = 0.5;
const CONTINUITY_THRESHOLD: f64 = 0.5;
const HIGH_INTEREST_SCORE: u8 = 4;
const MAX_LISTED_KEYWORDS: usize = 2;
const MAX_LISTED_TAGS: usize = 2;

/// Generate the justification string for a scored feature vector.
///
/// Clauses are evaluated in a fixed order and joined with
/// [`REASON_DELIMITER`]; an otherwise quiet camera gets
/// [`FALLBACK_REASON`].
pub fn generate_reason(features: &FeatureVector, scene: Option<&SceneBundle>) -> String {
    let mut reasons: Vec<String> = Vec::new();

    if features.face_salience > FACE_THRESHOLD {
        reasons.push("face visible".to_string());
    }

    if features.motion_salience > MOTION_THRESHOLD {
        reasons.push("high motion".to_string());
    }

    if features.speech_energy > SPEECH_THRESHOLD {
        reasons.push("speech detected".to_string());
    }

    if features.keyword_boost > 0.0 && !features.keywords.is_empty() {
        let listed: Vec<&str> = features
            .keywords
            .iter()
            .take(MAX_LISTED_KEYWORDS)
            .map(String::as_str)
            .collect();
        reasons.push(format!("keywords: {}", listed.join(",")));
    }

    if features.continuity_bonus > CONTINUITY_THRESHOLD {
        reasons.push("subject tracked".to_string());
    }

    if let Some(scene) = scene {
        if scene.interest_score >= HIGH_INTEREST_SCORE {
            reasons.push("high interest".to_string());
        }

        if !scene.tags.is_empty() {
            let listed: Vec<&str> = scene
                .tags
                .iter()
                .take(MAX_LISTED_TAGS)
                .map(String::as_str)
                .collect();
            reasons.push(format!("tags: {}", listed.join(",")));
        }
    }

    if reasons.is_empty() {
        reasons.push(FALLBACK_REASON.to_string());
    }

    reasons.join(REASON_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_camera_gets_fallback() {
        let reason = generate_reason(&FeatureVector::default(), None);
        assert_eq!(reason, "general scene");
    }

    #[test]
    fn test_single_clause() {
        let features = FeatureVector {
            face_salience: 0.62,
            ..Default::default()
        };
        assert_eq!(generate_reason(&features, None), "face visible");
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        // Exactly at threshold does not trigger.
        let features = FeatureVector {
            face_salience: 0.6,
            motion_salience: 0.5,
            speech_energy: 0.5,
            continuity_bonus: 0.5,
            ..Default::default()
        };
        assert_eq!(generate_reason(&features, None), "general scene");
    }

    #[test]
    fn test_clause_order_is_fixed() {
        let features = FeatureVector {
            face_salience: 0.9,
            motion_salience: 0.8,
            speech_energy: 0.7,
            keyword_boost: 0.3,
            continuity_bonus: 0.8,
            keywords: vec!["goal".to_string()],
            ..Default::default()
        };
        let scene = SceneBundle::new("crowd celebrating", 5)
            .with_tags(vec!["crowd".to_string(), "stadium".to_string(), "night".to_string()]);

        assert_eq!(
            generate_reason(&features, Some(&scene)),
            "face visible + high motion + speech detected + keywords: goal + \
             subject tracked + high interest + tags: crowd,stadium"
        );
    }

    #[test]
    fn test_keywords_truncated_to_two() {
        let features = FeatureVector {
            keyword_boost: 0.9,
            keywords: vec!["goal".to_string(), "score".to_string(), "win".to_string()],
            ..Default::default()
        };
        assert_eq!(generate_reason(&features, None), "keywords: goal,score");
    }

    #[test]
    fn test_moderate_interest_only_lists_tags() {
        let scene = SceneBundle::new("two people talking", 3)
            .with_tags(vec!["people".to_string()]);
        assert_eq!(
            generate_reason(&FeatureVector::default(), Some(&scene)),
            "tags: people"
        );
    }
}
