//! Per-frame input state
//!
//! Hosts translate window events into an [`InputSnapshot`] once per frame and
//! hand it to the controller and the picking context. Nothing here reads
//! global state.

use kestrel_core::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Input state for one frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Cursor position in pixels, origin top-left
    pub cursor: Vec2,
    /// Cursor movement since the previous frame
    pub cursor_delta: Vec2,
    /// Whether the window has focus; mouse look and picking are ignored otherwise
    pub input_enabled: bool,
    /// Currently pressed camera control keys
    pub keys: KeyState,
    /// Left mouse button went down this frame
    pub pick_pressed: bool,
    /// Ray debug key (F) went down this frame
    pub ray_debug_pressed: bool,
}

impl InputSnapshot {
    /// Create empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Focused snapshot with the cursor at `cursor` and nothing pressed
    pub fn focused_at(cursor: Vec2) -> Self {
        Self {
            cursor,
            input_enabled: true,
            ..Self::default()
        }
    }
}

/// Camera control key states
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyState {
    /// Move forward (W)
    pub forward: bool,
    /// Move backward (S)
    pub backward: bool,
    /// Strafe left (A)
    pub left: bool,
    /// Strafe right (D)
    pub right: bool,
    /// Move up along world Y (Space)
    pub up: bool,
    /// Move down along world Y (Left Ctrl)
    pub down: bool,
}

impl KeyState {
    /// Create with no keys pressed
    pub fn new() -> Self {
        Self::default()
    }

    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right || self.up || self.down
    }

    /// Unnormalized movement in camera terms: x = right, y = world up, z = forward
    pub fn axes(&self) -> Vec3 {
        let axis = |pos: bool, neg: bool| (pos as i8 - neg as i8) as f32;
        Vec3::new(
            axis(self.right, self.left),
            axis(self.up, self.down),
            axis(self.forward, self.backward),
        )
    }
}

/// Turns absolute cursor positions into per-frame deltas
///
/// The previous position is dropped whenever focus is lost, so the first
/// frame after focus returns reports a zero delta instead of a jump.
#[derive(Clone, Debug, Default)]
pub struct CursorTracker {
    previous: Option<Vec2>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `cursor` for this frame and return the movement since the last one
    pub fn track(&mut self, cursor: Vec2, focused: bool) -> Vec2 {
        if !focused {
            self.previous = None;
            return Vec2::ZERO;
        }

        let delta = match self.previous {
            Some(previous) => cursor - previous,
            None => Vec2::ZERO,
        };
        self.previous = Some(cursor);
        delta
    }

    /// Build a full snapshot, filling in `cursor_delta` and `input_enabled`
    pub fn snapshot(
        &mut self,
        cursor: Vec2,
        focused: bool,
        keys: KeyState,
        pick_pressed: bool,
        ray_debug_pressed: bool,
    ) -> InputSnapshot {
        let cursor_delta = self.track(cursor, focused);
        InputSnapshot {
            cursor,
            cursor_delta,
            input_enabled: focused,
            keys,
            pick_pressed,
            ray_debug_pressed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_axes() {
        let keys = KeyState {
            forward: true,
            left: true,
            ..KeyState::default()
        };
        assert_eq!(keys.axes(), Vec3::new(-1.0, 0.0, 1.0));
        assert!(keys.any());

        let opposed = KeyState {
            up: true,
            down: true,
            ..KeyState::default()
        };
        assert_eq!(opposed.axes(), Vec3::ZERO);
    }

    #[test]
    fn test_first_frame_has_no_delta() {
        let mut tracker = CursorTracker::new();
        assert_eq!(tracker.track(Vec2::new(100.0, 50.0), true), Vec2::ZERO);
        assert_eq!(
            tracker.track(Vec2::new(110.0, 45.0), true),
            Vec2::new(10.0, -5.0)
        );
    }

    #[test]
    fn test_focus_regain_resets_delta() {
        let mut tracker = CursorTracker::new();
        tracker.track(Vec2::new(0.0, 0.0), true);
        assert_eq!(tracker.track(Vec2::new(500.0, 500.0), false), Vec2::ZERO);
        assert_eq!(tracker.track(Vec2::new(600.0, 600.0), true), Vec2::ZERO);
        assert_eq!(
            tracker.track(Vec2::new(601.0, 600.0), true),
            Vec2::new(1.0, 0.0)
        );
    }

    #[test]
    fn test_snapshot_carries_focus() {
        let mut tracker = CursorTracker::new();
        let snap = tracker.snapshot(Vec2::new(5.0, 5.0), false, KeyState::new(), true, false);
        assert!(!snap.input_enabled);
        assert!(snap.pick_pressed);
        assert_eq!(snap.cursor_delta, Vec2::ZERO);
    }
}
