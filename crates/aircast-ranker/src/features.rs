//! Feature normalization rules.
//!
//! Pure functions mapping raw collaborator signals into [0, 1] components.
//! These define the scoring semantics: the weighted formula and any trained
//! model artifact are both calibrated against exactly these mappings.

use chrono::{DateTime, Utc};

use aircast_models::SceneBundle;

/// Clamp to [0, 1]; non-finite values collapse to 0.
pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Face confidence/area blend.
pub(crate) fn face_salience(face_conf_max: f64, face_area: f64) -> f64 {
    clamp01(0.6 * face_conf_max + 0.4 * face_area)
}

/// Velocity blend normalized against the calibrated "high motion" ceiling.
pub(crate) fn motion_salience(avg_velocity: f64, max_velocity: f64, ceiling_px_per_sec: f64) -> f64 {
    if ceiling_px_per_sec <= 0.0 {
        return 0.0;
    }
    clamp01((0.5 * avg_velocity + 0.5 * max_velocity) / ceiling_px_per_sec)
}

/// Linear dB-to-unit mapping over [floor, ceiling].
pub(crate) fn normalize_db(db: f64, floor_db: f64, ceiling_db: f64) -> f64 {
    if db <= floor_db {
        return 0.0;
    }
    if db >= ceiling_db {
        return 1.0;
    }
    clamp01((db - floor_db) / (ceiling_db - floor_db))
}

/// Boost of 0.3 per spotted keyword, saturating at 1.0.
pub(crate) fn keyword_boost(keyword_count: usize) -> f64 {
    clamp01(0.3 * keyword_count as f64)
}

/// Triangular framing quality: 1.0 across the ideal occupancy band, rising
/// linearly from empty frames, decaying linearly to 0 at full occupancy.
pub(crate) fn framing_score(occupancy: f64, ideal_min: f64, ideal_max: f64) -> f64 {
    if occupancy >= ideal_min && occupancy <= ideal_max {
        1.0
    } else if occupancy < ideal_min {
        clamp01(occupancy / ideal_min)
    } else {
        clamp01(1.0 - (occupancy - ideal_max) / (1.0 - ideal_max))
    }
}

/// Reward for time off-air: cameras never timestamped carry full novelty,
/// recently swapped-out ones earn it back over the window.
pub(crate) fn novelty_decay(
    last_active: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    window_secs: f64,
) -> f64 {
    let Some(last) = last_active else {
        return 1.0;
    };
    if window_secs <= 0.0 {
        return 1.0;
    }
    let elapsed = now.signed_duration_since(last).num_milliseconds() as f64 / 1000.0;
    clamp01(elapsed / window_secs)
}

/// Active-camera hysteresis plus tracklet stability.
pub(crate) fn continuity_bonus(is_active: bool, continuity_score: f64) -> f64 {
    let active_part = if is_active { 0.3 } else { 0.0 };
    clamp01(active_part + 0.7 * continuity_score)
}

/// Scene-model interest grade (1-5) rescaled to [0, 1]; absent scene reads
/// as zero interest.
pub(crate) fn vlm_interest(scene: Option<&SceneBundle>) -> f64 {
    match scene {
        Some(s) => clamp01((s.interest_score as f64 - 1.0) / 4.0),
        None => 0.0,
    }
}
