//! The camera ranking & arbitration engine.
//!
//! One [`CameraRanker`] instance per broadcast session. Each tick the
//! caller scores every candidate camera (independently or via [`rank`]),
//! decides whether to switch, and reports the decision back through
//! [`update_active_camera`]. All temporal memory lives inside the instance;
//! independent engines never share state.
//!
//! [`rank`]: CameraRanker::rank
//! [`update_active_camera`]: CameraRanker::update_active_camera

use chrono::{DateTime, Utc};
use metrics::counter;
use std::path::Path;
use tracing::{debug, error, info, warn};

use aircast_models::{
    AudioBundle, CameraId, DetectionBundle, FeatureVector, SceneBundle, ScoreResult,
    ScoringMethod, TrackingBundle,
};

use crate::config::RankerConfig;
use crate::explain;
use crate::features;
use crate::scoring::{LinearModelScorer, RuleBasedScorer, ScoringStrategy};
use crate::state::{FocusSnapshot, TemporalState};

/// One camera's collaborator bundles for a tick, as consumed by
/// [`CameraRanker::rank`].
#[derive(Debug, Clone)]
pub struct TickInput {
    pub camera_id: CameraId,
    pub detections: DetectionBundle,
    pub audio: AudioBundle,
    pub scene: Option<SceneBundle>,
    pub tracking: Option<TrackingBundle>,
}

impl TickInput {
    pub fn new(camera_id: impl Into<CameraId>, detections: DetectionBundle) -> Self {
        Self {
            camera_id: camera_id.into(),
            detections,
            audio: AudioBundle::silence(),
            scene: None,
            tracking: None,
        }
    }

    pub fn with_audio(mut self, audio: AudioBundle) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_scene(mut self, scene: SceneBundle) -> Self {
        self.scene = Some(scene);
        self
    }

    pub fn with_tracking(mut self, tracking: TrackingBundle) -> Self {
        self.tracking = Some(tracking);
        self
    }
}

/// Stateful per-session ranking engine.
///
/// Scoring is pure computation over caller-supplied bundles; the only
/// mutations are the documented temporal bookkeeping (subject positions
/// during scoring, switch timestamps during arbitration). `compute_score`
/// may run concurrently for different cameras; `update_active_camera` is
/// single-writer and must be serialized by the caller.
pub struct CameraRanker {
    config: RankerConfig,
    rule_based: RuleBasedScorer,
    model: Option<Box<dyn ScoringStrategy>>,
    state: TemporalState,
}

impl CameraRanker {
    /// Create a rule-based engine.
    pub fn new(config: RankerConfig) -> Self {
        let rule_based = RuleBasedScorer::new(config.weights);
        info!(method = %ScoringMethod::RuleBased, "Camera ranker initialized");
        Self {
            config,
            rule_based,
            model: None,
            state: TemporalState::default(),
        }
    }

    /// Create an engine with an injected scoring strategy.
    ///
    /// The strategy is consulted first for every score; any per-call error
    /// falls back to the rule-based formula for that call.
    pub fn with_strategy(config: RankerConfig, strategy: Box<dyn ScoringStrategy>) -> Self {
        let rule_based = RuleBasedScorer::new(config.weights);
        info!(method = %strategy.method(), "Camera ranker initialized with custom strategy");
        Self {
            config,
            rule_based,
            model: Some(strategy),
            state: TemporalState::default(),
        }
    }

    /// Create an engine that scores with a trained model artifact.
    ///
    /// A load failure disables model mode for the engine's lifetime and the
    /// engine runs rule-based; construction itself never fails.
    pub fn with_model_artifact(config: RankerConfig, path: impl AsRef<Path>) -> Self {
        match LinearModelScorer::from_path(path.as_ref()) {
            Ok(scorer) => {
                info!(path = %path.as_ref().display(), "Loaded model artifact");
                Self::with_strategy(config, Box::new(scorer))
            }
            Err(e) => {
                error!(
                    path = %path.as_ref().display(),
                    error = %e,
                    "Failed to load model artifact, using rule-based scoring only"
                );
                Self::new(config)
            }
        }
    }

    /// Whether a model-based strategy is active.
    pub fn is_model_backed(&self) -> bool {
        self.model.is_some()
    }

    /// The configuration in use.
    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Score one camera at the current wall-clock time.
    pub fn compute_score(
        &self,
        camera_id: &CameraId,
        detections: &DetectionBundle,
        audio: &AudioBundle,
        scene: Option<&SceneBundle>,
        tracking: Option<&TrackingBundle>,
    ) -> ScoreResult {
        self.compute_score_at(camera_id, detections, audio, scene, tracking, Utc::now())
    }

    /// Score one camera at an explicit evaluation time.
    ///
    /// Infallible: missing optional bundles and malformed inputs resolve to
    /// the documented neutral features, and model failures fall back to the
    /// rule-based formula.
    pub fn compute_score_at(
        &self,
        camera_id: &CameraId,
        detections: &DetectionBundle,
        audio: &AudioBundle,
        scene: Option<&SceneBundle>,
        tracking: Option<&TrackingBundle>,
        now: DateTime<Utc>,
    ) -> ScoreResult {
        let focus = self.state.focus_snapshot();
        let features = self.extract_features(camera_id, detections, audio, scene, tracking, &focus, now);
        let (score, method) = self.score_features(&features);
        let reason = explain::generate_reason(&features, scene);

        counter!("aircast_scores_total").increment(1);
        debug!(
            camera_id = %camera_id,
            score = score,
            method = %method,
            reason = %reason,
            "Camera scored"
        );

        ScoreResult {
            camera_id: camera_id.clone(),
            timestamp: now,
            score,
            features,
            reason,
            method,
            vlm_tags: scene.map(|s| s.tags.clone()).unwrap_or_default(),
            vlm_caption: scene.map(|s| s.caption.clone()).unwrap_or_default(),
            tracking_present: tracking.is_some_and(|t| t.track_count > 0),
        }
    }

    /// Score a batch of candidate cameras and return results ordered by
    /// descending score (stable for ties).
    ///
    /// The shared focus is stable across the batch because switches only
    /// happen through [`Self::update_active_camera`], which the caller
    /// serializes against ticks.
    pub fn rank(&self, inputs: &[TickInput]) -> Vec<ScoreResult> {
        self.rank_at(inputs, Utc::now())
    }

    /// [`Self::rank`] at an explicit evaluation time.
    pub fn rank_at(&self, inputs: &[TickInput], now: DateTime<Utc>) -> Vec<ScoreResult> {
        let mut results: Vec<ScoreResult> = inputs
            .iter()
            .map(|input| {
                self.compute_score_at(
                    &input.camera_id,
                    &input.detections,
                    &input.audio,
                    input.scene.as_ref(),
                    input.tracking.as_ref(),
                    now,
                )
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results
    }

    /// Record the caller's switch decision at the current wall-clock time.
    pub fn update_active_camera(&self, camera_id: &CameraId, main_subject_id: Option<u64>) {
        self.update_active_camera_at(camera_id, main_subject_id, Utc::now());
    }

    /// Record the caller's switch decision at an explicit time.
    ///
    /// If the active camera changes, the outgoing camera's off-air
    /// timestamp is set to `now` (starting its novelty recovery). A given
    /// `main_subject_id` overwrites the remembered subject identity; `None`
    /// leaves it untouched.
    pub fn update_active_camera_at(
        &self,
        camera_id: &CameraId,
        main_subject_id: Option<u64>,
        now: DateTime<Utc>,
    ) {
        if let Some(previous) = self.state.mark_switch(camera_id, main_subject_id, now) {
            counter!("aircast_camera_switches_total").increment(1);
            info!(
                from = %previous,
                to = %camera_id,
                main_subject_id = ?main_subject_id,
                "Active camera switched"
            );
        } else {
            debug!(camera_id = %camera_id, "Active camera confirmed");
        }
    }

    /// Clear all temporal state, e.g. on a broadcast segment boundary.
    /// Every camera is treated as never-seen afterwards.
    pub fn reset(&self) {
        self.state.reset();
        info!("Ranker state reset");
    }

    fn score_features(&self, features: &FeatureVector) -> (f64, ScoringMethod) {
        if let Some(model) = &self.model {
            match model.score(features) {
                Ok(score) => return (score, model.method()),
                Err(e) => {
                    counter!("aircast_model_fallbacks_total").increment(1);
                    warn!(error = %e, "Model scoring failed, falling back to rule-based");
                }
            }
        }
        (self.rule_based.weighted_sum(features), ScoringMethod::RuleBased)
    }

    fn extract_features(
        &self,
        camera_id: &CameraId,
        detections: &DetectionBundle,
        audio: &AudioBundle,
        scene: Option<&SceneBundle>,
        tracking: Option<&TrackingBundle>,
        focus: &FocusSnapshot,
        now: DateTime<Utc>,
    ) -> FeatureVector {
        let cal = &self.config.calibration;

        let is_active = focus.active.as_ref() == Some(camera_id);
        let continuity_score = tracking.map_or(0.0, |t| t.continuity_score);

        FeatureVector {
            face_salience: features::face_salience(detections.face_conf_max, detections.face_area),
            main_subject_overlap: self.subject_overlap(camera_id, detections, tracking, focus),
            motion_salience: features::motion_salience(
                detections.avg_velocity,
                detections.max_velocity,
                cal.motion_ceiling_px_per_sec,
            ),
            speech_energy: features::normalize_db(
                audio.energy_db,
                cal.energy_floor_db,
                cal.energy_ceiling_db,
            ),
            keyword_boost: features::keyword_boost(audio.keywords.len()),
            framing_score: features::framing_score(
                detections.bbox_occupancy,
                cal.framing_ideal_min,
                cal.framing_ideal_max,
            ),
            novelty_decay: features::novelty_decay(
                self.state.last_active_for(camera_id),
                now,
                cal.novelty_window_secs,
            ),
            continuity_bonus: features::continuity_bonus(is_active, continuity_score),
            vlm_interest: features::vlm_interest(scene),
            object_counts: detections.object_counts.clone(),
            keywords: audio.keyword_names(),
            avg_velocity: detections.avg_velocity,
            max_velocity: detections.max_velocity,
            track_count: tracking.map_or(0, |t| t.track_count),
        }
    }

    /// Consistency of this camera's view of the main subject.
    ///
    /// The tracker's continuity score is trusted when it reports the same
    /// subject identity the engine remembers; otherwise the centroid of the
    /// largest detection is compared against the last remembered position
    /// (which is then updated).
    fn subject_overlap(
        &self,
        camera_id: &CameraId,
        detections: &DetectionBundle,
        tracking: Option<&TrackingBundle>,
        focus: &FocusSnapshot,
    ) -> f64 {
        if let Some(t) = tracking {
            if t.main_subject_present {
                if let (Some(id), Some(remembered)) = (t.main_subject_id, focus.main_subject) {
                    if id == remembered {
                        return features::clamp01(t.continuity_score);
                    }
                }
            }
        }

        let Some(largest) = detections.largest_detection() else {
            return 0.0;
        };

        let previous = self.state.swap_position(camera_id, largest.centroid);
        match previous {
            Some(prev) => {
                let distance = prev.distance_to(&largest.centroid);
                features::clamp01(1.0 - distance / self.config.calibration.overlap_decay_px)
            }
            None => 0.5,
        }
    }
}
