//! Shared data models for the Aircast camera ranking engine.
//!
//! This crate provides Serde-serializable types for:
//! - Camera identifiers
//! - Per-camera collaborator bundles (detection, audio, scene, tracking)
//! - The normalized feature vector
//! - Score results and the `SCORE` pub/sub message envelope

pub mod audio;
pub mod camera;
pub mod detection;
pub mod features;
pub mod scene;
pub mod score;
pub mod tracking;

// Re-export common types
pub use audio::{AudioBundle, KeywordHit};
pub use camera::CameraId;
pub use detection::{Detection, DetectionBundle, PixelPoint, PixelRect};
pub use features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use scene::SceneBundle;
pub use score::{ScoreMessage, ScoreResult, ScoringMethod};
pub use tracking::TrackingBundle;
