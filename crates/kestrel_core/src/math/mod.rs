//! Math utilities for 3D transforms

mod mat4;
mod quat;
mod vec;

pub use mat4::Mat4;
pub use quat::Quat;
pub use vec::{Vec2, Vec3, Vec4};

/// Smallest magnitude a scale component may take before it is inverted.
pub const EPSILON: f32 = f32::EPSILON;

/// Reciprocal of `x` with its magnitude clamped to at least [`EPSILON`].
///
/// The sign of `x` is preserved, so a zero scale axis inverts to a large but
/// finite value instead of infinity.
pub fn safe_recip(x: f32) -> f32 {
    let magnitude = x.abs().max(EPSILON);
    if x.is_sign_negative() {
        -1.0 / magnitude
    } else {
        1.0 / magnitude
    }
}
