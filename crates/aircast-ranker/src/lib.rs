//! Camera ranking & arbitration engine.
//!
//! This crate fuses heterogeneous per-camera signals (detections, motion,
//! tracking continuity, speech, vision-language judgments) into one
//! comparable broadcast-worthiness score per camera per tick, with the
//! temporal memory (novelty, continuity, active-camera hysteresis) that
//! keeps switching decisions stable and explainable.
//!
//! Perception models and transport are external collaborators: the engine
//! consumes pre-computed bundles and returns scored, justified results. It
//! performs no I/O beyond optional model artifact loading at construction.

pub mod config;
pub mod error;
pub mod explain;
pub mod ranker;
pub mod scoring;

mod features;
mod state;

pub use config::{Calibration, RankerConfig, RankingWeights};
pub use error::{RankerError, RankerResult};
pub use ranker::{CameraRanker, TickInput};
pub use scoring::{
    LinearModelArtifact, LinearModelScorer, RuleBasedScorer, ScoringStrategy,
    MODEL_ARTIFACT_VERSION,
};
