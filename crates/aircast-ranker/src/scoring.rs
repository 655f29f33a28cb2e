//! Scoring strategies.
//!
//! Two interchangeable backends behind one trait: the deterministic
//! weighted sum, and a trained model loaded from an external artifact. The
//! engine wraps model calls with a rule-based fallback, so a strategy error
//! here never surfaces to callers.

use std::path::Path;

use serde::{Deserialize, Serialize};

use aircast_models::{FeatureVector, ScoringMethod, FEATURE_COUNT};

use crate::config::RankingWeights;
use crate::error::{RankerError, RankerResult};

/// A scoring backend.
///
/// Implementations must be `Send + Sync` so one engine can score cameras
/// from multiple threads, and must treat the feature vector as the complete
/// input: no hidden state across calls.
pub trait ScoringStrategy: Send + Sync {
    /// Which method tag results produced by this strategy carry.
    fn method(&self) -> ScoringMethod;

    /// Score a normalized feature vector.
    fn score(&self, features: &FeatureVector) -> RankerResult<f64>;
}

/// Deterministic weighted sum over the nine components.
#[derive(Debug, Clone)]
pub struct RuleBasedScorer {
    weights: RankingWeights,
}

impl RuleBasedScorer {
    /// Create a scorer; weights are sanitized (negatives clamp to 0).
    pub fn new(weights: RankingWeights) -> Self {
        Self {
            weights: weights.sanitized(),
        }
    }

    /// The sanitized weights in use.
    pub fn weights(&self) -> &RankingWeights {
        &self.weights
    }

    /// The weighted sum itself. Infallible, exposed for the fallback path.
    pub fn weighted_sum(&self, features: &FeatureVector) -> f64 {
        let w = &self.weights;
        w.face_salience * features.face_salience
            + w.main_subject_overlap * features.main_subject_overlap
            + w.motion_salience * features.motion_salience
            + w.speech_energy * features.speech_energy
            + w.keyword_boost * features.keyword_boost
            + w.framing_score * features.framing_score
            + w.novelty_decay * features.novelty_decay
            + w.continuity_bonus * features.continuity_bonus
            + w.vlm_interest * features.vlm_interest
    }
}

impl Default for RuleBasedScorer {
    fn default() -> Self {
        Self::new(RankingWeights::default())
    }
}

impl ScoringStrategy for RuleBasedScorer {
    fn method(&self) -> ScoringMethod {
        ScoringMethod::RuleBased
    }

    fn score(&self, features: &FeatureVector) -> RankerResult<f64> {
        Ok(self.weighted_sum(features))
    }
}

/// Supported artifact format version.
pub const MODEL_ARTIFACT_VERSION: u32 = 1;

/// On-disk artifact for [`LinearModelScorer`].
///
/// `weights` follows the fixed component order documented by
/// [`aircast_models::FEATURE_NAMES`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    /// Artifact format version
    pub version: u32,
    /// One coefficient per feature component, in scoring order
    pub weights: Vec<f64>,
    /// Intercept
    pub bias: f64,
}

/// Trained linear regressor loaded from a JSON artifact.
///
/// Stands in for any externally trained scorer exported to coefficients;
/// richer models plug in through [`ScoringStrategy`] instead.
#[derive(Debug, Clone)]
pub struct LinearModelScorer {
    weights: [f64; FEATURE_COUNT],
    bias: f64,
}

impl LinearModelScorer {
    /// Build from a parsed artifact, validating version, arity, and
    /// finiteness.
    pub fn from_artifact(artifact: &LinearModelArtifact) -> RankerResult<Self> {
        if artifact.version != MODEL_ARTIFACT_VERSION {
            return Err(RankerError::model_load(format!(
                "unsupported artifact version {} (expected {})",
                artifact.version, MODEL_ARTIFACT_VERSION
            )));
        }
        if artifact.weights.len() != FEATURE_COUNT {
            return Err(RankerError::model_load(format!(
                "artifact has {} weights, expected {}",
                artifact.weights.len(),
                FEATURE_COUNT
            )));
        }
        if !artifact.bias.is_finite() || artifact.weights.iter().any(|w| !w.is_finite()) {
            return Err(RankerError::model_load("artifact contains non-finite parameters"));
        }

        let mut weights = [0.0; FEATURE_COUNT];
        weights.copy_from_slice(&artifact.weights);
        Ok(Self {
            weights,
            bias: artifact.bias,
        })
    }

    /// Load an artifact from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> RankerResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let artifact: LinearModelArtifact = serde_json::from_str(&raw)
            .map_err(|e| RankerError::model_load(format!("invalid artifact JSON: {e}")))?;
        Self::from_artifact(&artifact)
    }
}

impl ScoringStrategy for LinearModelScorer {
    fn method(&self) -> ScoringMethod {
        ScoringMethod::Model
    }

    fn score(&self, features: &FeatureVector) -> RankerResult<f64> {
        let inputs = features.as_array();
        let score: f64 = self
            .weights
            .iter()
            .zip(inputs.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;

        if !score.is_finite() {
            return Err(RankerError::model_score(format!(
                "non-finite score {score} from model inference"
            )));
        }
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn features_with(face: f64, motion: f64) -> FeatureVector {
        FeatureVector {
            face_salience: face,
            motion_salience: motion,
            ..Default::default()
        }
    }

    #[test]
    fn test_rule_based_is_pure() {
        let scorer = RuleBasedScorer::default();
        let features = features_with(0.8, 0.5);

        let first = scorer.score(&features).unwrap();
        let second = scorer.score(&features).unwrap();
        assert_eq!(first, second);
        assert!((first - (0.20 * 0.8 + 0.15 * 0.5)).abs() < 1e-9);
    }

    #[test]
    fn test_rule_based_sanitizes_weights() {
        let scorer = RuleBasedScorer::new(RankingWeights {
            face_salience: -1.0,
            ..RankingWeights::default()
        });
        let score = scorer.score(&features_with(1.0, 0.0)).unwrap();
        // Negative weight clamps to 0, so a pure-face vector scores 0.
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_linear_model_dot_product() {
        let artifact = LinearModelArtifact {
            version: MODEL_ARTIFACT_VERSION,
            weights: vec![1.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            bias: 0.1,
        };
        let scorer = LinearModelScorer::from_artifact(&artifact).unwrap();
        let score = scorer.score(&features_with(0.5, 0.25)).unwrap();
        assert!((score - (0.5 + 0.5 + 0.1)).abs() < 1e-9);
        assert_eq!(scorer.method(), ScoringMethod::Model);
    }

    #[test]
    fn test_artifact_arity_rejected() {
        let artifact = LinearModelArtifact {
            version: MODEL_ARTIFACT_VERSION,
            weights: vec![1.0, 2.0],
            bias: 0.0,
        };
        let err = LinearModelScorer::from_artifact(&artifact).unwrap_err();
        assert!(matches!(err, RankerError::ModelLoad(_)));
    }

    #[test]
    fn test_artifact_version_rejected() {
        let artifact = LinearModelArtifact {
            version: 99,
            weights: vec![0.0; FEATURE_COUNT],
            bias: 0.0,
        };
        assert!(LinearModelScorer::from_artifact(&artifact).is_err());
    }

    #[test]
    fn test_artifact_non_finite_rejected() {
        let artifact = LinearModelArtifact {
            version: MODEL_ARTIFACT_VERSION,
            weights: vec![f64::NAN; FEATURE_COUNT],
            bias: 0.0,
        };
        assert!(LinearModelScorer::from_artifact(&artifact).is_err());
    }

    #[test]
    fn test_load_from_json_file() {
        let artifact = LinearModelArtifact {
            version: MODEL_ARTIFACT_VERSION,
            weights: vec![0.1; FEATURE_COUNT],
            bias: 0.05,
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&artifact).unwrap()).unwrap();

        let scorer = LinearModelScorer::from_path(file.path()).unwrap();
        let score = scorer.score(&FeatureVector::default()).unwrap();
        assert!((score - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(LinearModelScorer::from_path("/nonexistent/model.json").is_err());
    }

    #[test]
    fn test_load_malformed_json_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = LinearModelScorer::from_path(file.path()).unwrap_err();
        assert!(matches!(err, RankerError::ModelLoad(_)));
    }
}
