//! Object/person detection bundle models.
//!
//! One `DetectionBundle` is produced per camera per frame sample by the
//! external detector and is immutable once handed to the engine. Geometry is
//! in source-frame pixels; velocities are px/s from frame-to-frame deltas.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A rectangle in source-frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PixelRect {
    /// X coordinate of the top-left corner
    pub x: f64,
    /// Y coordinate of the top-left corner
    pub y: f64,
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl PixelRect {
    /// Create a new pixel rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Get center X coordinate.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Get center Y coordinate.
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Get area in square pixels.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A point in source-frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &PixelPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A single object/person detection from the external detector.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Detection {
    /// Class label (e.g. "person", "dog")
    pub label: String,

    /// Detection confidence (0.0-1.0)
    pub confidence: f32,

    /// Bounding box in pixel coordinates
    pub bbox: PixelRect,

    /// Centroid of the bounding box in pixel coordinates
    pub centroid: PixelPoint,

    /// Bounding box area in square pixels
    pub area: f64,

    /// Estimated velocity in px/s
    pub velocity: f64,
}

impl Detection {
    /// Create a detection from a bounding box; centroid and area are derived.
    pub fn new(label: impl Into<String>, confidence: f32, bbox: PixelRect) -> Self {
        Self {
            label: label.into(),
            confidence,
            bbox,
            centroid: PixelPoint::new(bbox.center_x(), bbox.center_y()),
            area: bbox.area(),
            velocity: 0.0,
        }
    }

    /// Set the estimated velocity.
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }
}

/// Per-camera output of the detection collaborator for one frame sample.
///
/// Aggregates (`motion_score`, `bbox_occupancy`, face stats, velocities) are
/// computed upstream by the detector over the full detection set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DetectionBundle {
    /// All detections in this frame sample
    pub detections: Vec<Detection>,

    /// Count of detections per class label
    pub object_counts: BTreeMap<String, u32>,

    /// Aggregate motion score from the detector (0.0-1.0)
    pub motion_score: f64,

    /// Fraction of the frame covered by detection boxes (0.0-1.0)
    pub bbox_occupancy: f64,

    /// Highest face detection confidence in the frame (0.0-1.0)
    pub face_conf_max: f64,

    /// Normalized area of the largest face (0.0-1.0)
    pub face_area: f64,

    /// Mean detection velocity in px/s
    pub avg_velocity: f64,

    /// Highest detection velocity in px/s
    pub max_velocity: f64,
}

impl DetectionBundle {
    /// Find the largest detection by area, the likely main subject.
    pub fn largest_detection(&self) -> Option<&Detection> {
        self.detections.iter().max_by(|a, b| {
            a.area
                .partial_cmp(&b.area)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}
