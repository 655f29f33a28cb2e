//! Ranker configuration.

/// Weights for the rule-based scoring formula.
///
/// One non-negative weight per feature component. The defaults sum to 1.0;
/// that is a convention, not a requirement, so callers may pass unnormalized
/// weights to emphasize a signal. Negative or non-finite weights are clamped
/// to 0 by [`RankingWeights::sanitized`], which every engine constructor
/// applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingWeights {
    pub face_salience: f64,
    pub main_subject_overlap: f64,
    pub motion_salience: f64,
    pub speech_energy: f64,
    pub keyword_boost: f64,
    pub framing_score: f64,
    pub novelty_decay: f64,
    pub continuity_bonus: f64,
    pub vlm_interest: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            face_salience: 0.20,
            main_subject_overlap: 0.15,
            motion_salience: 0.15,
            speech_energy: 0.12,
            keyword_boost: 0.10,
            framing_score: 0.08,
            novelty_decay: 0.05,
            continuity_bonus: 0.10,
            vlm_interest: 0.05,
        }
    }
}

impl RankingWeights {
    /// Clamp negative and non-finite weights to 0.
    pub fn sanitized(self) -> Self {
        fn guard(w: f64) -> f64 {
            if w.is_finite() {
                w.max(0.0)
            } else {
                0.0
            }
        }
        Self {
            face_salience: guard(self.face_salience),
            main_subject_overlap: guard(self.main_subject_overlap),
            motion_salience: guard(self.motion_salience),
            speech_energy: guard(self.speech_energy),
            keyword_boost: guard(self.keyword_boost),
            framing_score: guard(self.framing_score),
            novelty_decay: guard(self.novelty_decay),
            continuity_bonus: guard(self.continuity_bonus),
            vlm_interest: guard(self.vlm_interest),
        }
    }
}

/// Normalization constants for feature extraction.
///
/// The defaults are the calibration the scoring formula was tuned against;
/// deployments at unusual resolutions or audio setups can override them, but
/// the defaults must stay stable for score compatibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Velocity treated as "high motion", in px/s
    pub motion_ceiling_px_per_sec: f64,
    /// Centroid distance at which subject overlap decays to 0, in px
    pub overlap_decay_px: f64,
    /// Seconds off-air after which full novelty is restored
    pub novelty_window_secs: f64,
    /// Energy mapped to 0.0 speech energy, in dBFS
    pub energy_floor_db: f64,
    /// Energy mapped to 1.0 speech energy, in dBFS
    pub energy_ceiling_db: f64,
    /// Lower edge of the ideal bbox-occupancy band
    pub framing_ideal_min: f64,
    /// Upper edge of the ideal bbox-occupancy band
    pub framing_ideal_max: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            motion_ceiling_px_per_sec: 100.0,
            overlap_decay_px: 200.0,
            novelty_window_secs: 10.0,
            energy_floor_db: -60.0,
            energy_ceiling_db: -10.0,
            framing_ideal_min: 0.3,
            framing_ideal_max: 0.6,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Default)]
pub struct RankerConfig {
    /// Rule-based scoring weights
    pub weights: RankingWeights,
    /// Feature normalization constants
    pub calibration: Calibration,
}

impl RankerConfig {
    /// Create config from environment variables, falling back to defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        let w = RankingWeights::default();
        let c = Calibration::default();
        Self {
            weights: RankingWeights {
                face_salience: env_f64("RANKER_WEIGHT_FACE_SALIENCE", w.face_salience),
                main_subject_overlap: env_f64(
                    "RANKER_WEIGHT_MAIN_SUBJECT_OVERLAP",
                    w.main_subject_overlap,
                ),
                motion_salience: env_f64("RANKER_WEIGHT_MOTION_SALIENCE", w.motion_salience),
                speech_energy: env_f64("RANKER_WEIGHT_SPEECH_ENERGY", w.speech_energy),
                keyword_boost: env_f64("RANKER_WEIGHT_KEYWORD_BOOST", w.keyword_boost),
                framing_score: env_f64("RANKER_WEIGHT_FRAMING_SCORE", w.framing_score),
                novelty_decay: env_f64("RANKER_WEIGHT_NOVELTY_DECAY", w.novelty_decay),
                continuity_bonus: env_f64("RANKER_WEIGHT_CONTINUITY_BONUS", w.continuity_bonus),
                vlm_interest: env_f64("RANKER_WEIGHT_VLM_INTEREST", w.vlm_interest),
            },
            calibration: Calibration {
                motion_ceiling_px_per_sec: env_f64(
                    "RANKER_MOTION_CEILING_PX_PER_SEC",
                    c.motion_ceiling_px_per_sec,
                ),
                overlap_decay_px: env_f64("RANKER_OVERLAP_DECAY_PX", c.overlap_decay_px),
                novelty_window_secs: env_f64("RANKER_NOVELTY_WINDOW_SECS", c.novelty_window_secs),
                energy_floor_db: env_f64("RANKER_ENERGY_FLOOR_DB", c.energy_floor_db),
                energy_ceiling_db: env_f64("RANKER_ENERGY_CEILING_DB", c.energy_ceiling_db),
                framing_ideal_min: env_f64("RANKER_FRAMING_IDEAL_MIN", c.framing_ideal_min),
                framing_ideal_max: env_f64("RANKER_FRAMING_IDEAL_MAX", c.framing_ideal_max),
            },
        }
    }

    /// Replace the scoring weights.
    pub fn with_weights(mut self, weights: RankingWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Replace the calibration constants.
    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = RankingWeights::default();
        let sum = w.face_salience
            + w.main_subject_overlap
            + w.motion_salience
            + w.speech_energy
            + w.keyword_boost
            + w.framing_score
            + w.novelty_decay
            + w.continuity_bonus
            + w.vlm_interest;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sanitize_clamps_negative_and_nan() {
        let w = RankingWeights {
            face_salience: -0.5,
            motion_salience: f64::NAN,
            speech_energy: f64::INFINITY,
            ..RankingWeights::default()
        }
        .sanitized();

        assert_eq!(w.face_salience, 0.0);
        assert_eq!(w.motion_salience, 0.0);
        assert_eq!(w.speech_energy, 0.0);
        // Untouched weights survive.
        assert_eq!(w.keyword_boost, RankingWeights::default().keyword_boost);
    }

    #[test]
    fn test_unnormalized_weights_pass_sanitize() {
        let w = RankingWeights {
            face_salience: 3.0,
            ..RankingWeights::default()
        }
        .sanitized();
        assert_eq!(w.face_salience, 3.0);
    }

    #[test]
    fn test_default_calibration_matches_tuning() {
        let c = Calibration::default();
        assert_eq!(c.motion_ceiling_px_per_sec, 100.0);
        assert_eq!(c.overlap_decay_px, 200.0);
        assert_eq!(c.novelty_window_secs, 10.0);
        assert_eq!(c.energy_floor_db, -60.0);
        assert_eq!(c.energy_ceiling_db, -10.0);
    }
}
