//! Fly camera controller
//!
//! Mouse look with yaw and pitch in degrees, keyboard movement along the
//! camera's forward and right vectors and world up.

use super::InputSnapshot;
use crate::scene::Node;
use kestrel_core::{Quat, Vec3};

/// Position and orientation produced by a controller update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTransform {
    /// World position
    pub position: Vec3,
    /// Rotation as quaternion
    pub rotation: Quat,
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl CameraTransform {
    /// Write into a node's local transform, keeping its scale
    pub fn apply_to(&self, node: &mut Node) {
        node.position = self.position;
        node.rotation = self.rotation;
    }
}

/// Free-flight camera controller
///
/// # Example
///
/// ```
/// use kestrel_3d::controls::{FlyController, InputSnapshot};
/// use kestrel_core::Vec3;
///
/// let mut fly = FlyController::new(Vec3::new(0.0, 1.0, 6.0));
/// let mut input = InputSnapshot::new();
/// input.keys.forward = true;
///
/// let transform = fly.update(0.5, &input);
/// assert!((transform.position.z - 2.5).abs() < 1e-4);
/// ```
#[derive(Clone, Debug)]
pub struct FlyController {
    /// Current position
    pub position: Vec3,
    /// Yaw angle (degrees, 0 = looking down -Z)
    pub yaw: f32,
    /// Pitch angle (degrees, 0 = horizontal)
    pub pitch: f32,

    /// Movement speed (units per second)
    pub speed: f32,
    /// Yaw change per pixel of horizontal cursor movement per second
    pub yaw_speed: f32,
    /// Pitch change per pixel of vertical cursor movement per second
    pub pitch_speed: f32,
    /// Pitch is clamped to +/- this many degrees
    pub pitch_limit: f32,
}

impl Default for FlyController {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl FlyController {
    pub const DEFAULT_SPEED: f32 = 7.0;
    pub const DEFAULT_YAW_SPEED: f32 = 20.0;
    pub const DEFAULT_PITCH_SPEED: f32 = 10.0;
    pub const DEFAULT_PITCH_LIMIT: f32 = 80.0;

    /// Create a new fly controller at position
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            speed: Self::DEFAULT_SPEED,
            yaw_speed: Self::DEFAULT_YAW_SPEED,
            pitch_speed: Self::DEFAULT_PITCH_SPEED,
            pitch_limit: Self::DEFAULT_PITCH_LIMIT,
        }
    }

    /// Set look direction from yaw and pitch (degrees)
    pub fn set_rotation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw % 360.0;
        self.pitch = pitch.clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Get forward direction vector
    pub fn forward(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let cos_pitch = pitch.cos();
        Vec3::new(-cos_pitch * yaw.sin(), pitch.sin(), -cos_pitch * yaw.cos())
    }

    /// Get right direction vector
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::UP).normalize()
    }

    /// Yaw about world up, then pitch about the local X axis
    pub fn rotation(&self) -> Quat {
        Quat::from_axis_deg(self.yaw, Vec3::UP) * Quat::from_axis_deg(self.pitch, Vec3::X)
    }

    /// Current transform without advancing time
    pub fn transform(&self) -> CameraTransform {
        CameraTransform {
            position: self.position,
            rotation: self.rotation(),
        }
    }

    /// Advance by `dt` seconds and return the new transform
    ///
    /// Mouse look only applies while input is enabled. Movement keys apply
    /// regardless.
    pub fn update(&mut self, dt: f32, input: &InputSnapshot) -> CameraTransform {
        if input.input_enabled {
            let yaw = self.yaw - input.cursor_delta.x * self.yaw_speed * dt;
            let pitch = self.pitch - input.cursor_delta.y * self.pitch_speed * dt;
            self.set_rotation(yaw, pitch);
        }

        let axes = input.keys.axes();
        if axes != Vec3::ZERO {
            let step = self.speed * dt;
            self.position += self.forward() * (axes.z * step);
            self.position += self.right() * (axes.x * step);
            self.position += Vec3::UP * (axes.y * step);
        }

        self.transform()
    }
}
