//! Per-engine temporal memory.
//!
//! Per-camera maps sit behind their own locks so concurrent score
//! computations for different cameras do not contend on the cross-cutting
//! focus state. The focus pair (active camera + main subject identity) is
//! read as one snapshot per scoring call and written only through the
//! arbitration operations.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use aircast_models::{CameraId, PixelPoint};

/// Cross-cutting focus state, written only by `update_active_camera`/`reset`.
#[derive(Debug, Clone, Default)]
pub(crate) struct FocusSnapshot {
    /// Camera currently on air, as last reported by the caller
    pub active: Option<CameraId>,
    /// Remembered main-subject track identity
    pub main_subject: Option<u64>,
}

/// Temporal memory for one engine instance.
#[derive(Debug, Default)]
pub(crate) struct TemporalState {
    /// When each camera last left the active slot
    last_active: RwLock<HashMap<CameraId, DateTime<Utc>>>,
    /// Last remembered main-subject centroid per camera
    positions: Mutex<HashMap<CameraId, PixelPoint>>,
    /// Shared focus pair
    focus: RwLock<FocusSnapshot>,
}

impl TemporalState {
    /// Read the focus pair as a single consistent snapshot.
    pub fn focus_snapshot(&self) -> FocusSnapshot {
        self.focus.read().expect("focus lock poisoned").clone()
    }

    /// When `camera_id` last left the active slot, if ever.
    pub fn last_active_for(&self, camera_id: &CameraId) -> Option<DateTime<Utc>> {
        self.last_active
            .read()
            .expect("last_active lock poisoned")
            .get(camera_id)
            .copied()
    }

    /// Store the new remembered position for `camera_id`, returning the
    /// previous one.
    pub fn swap_position(&self, camera_id: &CameraId, position: PixelPoint) -> Option<PixelPoint> {
        self.positions
            .lock()
            .expect("positions lock poisoned")
            .insert(camera_id.clone(), position)
    }

    /// Record a switch to `camera_id`, timestamping the outgoing camera.
    ///
    /// Returns the previously active camera when the switch actually changed
    /// cameras.
    pub fn mark_switch(
        &self,
        camera_id: &CameraId,
        main_subject_id: Option<u64>,
        now: DateTime<Utc>,
    ) -> Option<CameraId> {
        let mut focus = self.focus.write().expect("focus lock poisoned");

        let previous = match focus.active.as_ref() {
            Some(prev) if prev != camera_id => {
                self.last_active
                    .write()
                    .expect("last_active lock poisoned")
                    .insert(prev.clone(), now);
                Some(prev.clone())
            }
            _ => None,
        };

        focus.active = Some(camera_id.clone());
        if main_subject_id.is_some() {
            focus.main_subject = main_subject_id;
        }

        previous
    }

    /// Clear all temporal memory back to construction state.
    pub fn reset(&self) {
        self.last_active
            .write()
            .expect("last_active lock poisoned")
            .clear();
        self.positions.lock().expect("positions lock poisoned").clear();
        *self.focus.write().expect("focus lock poisoned") = FocusSnapshot::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cam(id: &str) -> CameraId {
        CameraId::from(id)
    }

    #[test]
    fn test_switch_timestamps_outgoing_camera() {
        let state = TemporalState::default();
        let t0 = Utc::now();
        let t1 = t0 + chrono::Duration::seconds(5);

        assert_eq!(state.mark_switch(&cam("a"), None, t0), None);
        assert_eq!(state.last_active_for(&cam("a")), None);

        let previous = state.mark_switch(&cam("b"), None, t1);
        assert_eq!(previous, Some(cam("a")));
        assert_eq!(state.last_active_for(&cam("a")), Some(t1));
        assert_eq!(state.last_active_for(&cam("b")), None);
    }

    #[test]
    fn test_repeated_switch_to_same_camera_is_noop() {
        let state = TemporalState::default();
        let t0 = Utc::now();

        state.mark_switch(&cam("a"), None, t0);
        let previous = state.mark_switch(&cam("a"), None, t0 + chrono::Duration::seconds(3));

        assert_eq!(previous, None);
        assert_eq!(state.last_active_for(&cam("a")), None);
    }

    #[test]
    fn test_main_subject_only_overwritten_when_given() {
        let state = TemporalState::default();
        let now = Utc::now();

        state.mark_switch(&cam("a"), Some(42), now);
        assert_eq!(state.focus_snapshot().main_subject, Some(42));

        state.mark_switch(&cam("b"), None, now);
        assert_eq!(state.focus_snapshot().main_subject, Some(42));

        state.mark_switch(&cam("a"), Some(7), now);
        assert_eq!(state.focus_snapshot().main_subject, Some(7));
    }

    #[test]
    fn test_swap_position_returns_previous() {
        let state = TemporalState::default();
        let first = PixelPoint::new(10.0, 20.0);
        let second = PixelPoint::new(30.0, 40.0);

        assert_eq!(state.swap_position(&cam("a"), first), None);
        let prev = state.swap_position(&cam("a"), second).expect("prior position");
        assert!((prev.x - 10.0).abs() < 1e-9);

        // Positions are keyed per camera.
        assert_eq!(state.swap_position(&cam("b"), first), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let state = TemporalState::default();
        let now = Utc::now();

        state.mark_switch(&cam("a"), Some(1), now);
        state.mark_switch(&cam("b"), None, now);
        state.swap_position(&cam("a"), PixelPoint::new(1.0, 1.0));

        state.reset();

        let focus = state.focus_snapshot();
        assert!(focus.active.is_none());
        assert!(focus.main_subject.is_none());
        assert_eq!(state.last_active_for(&cam("a")), None);
        assert_eq!(state.swap_position(&cam("a"), PixelPoint::new(2.0, 2.0)), None);
    }
}
