//! Screen to world unprojection
//!
//! Coordinate pipeline: screen pixels -> NDC -> clip -> eye -> world.

use super::Ray;
use kestrel_core::{Mat4, Vec3, Vec4};

/// Map a pixel coordinate (top-left origin, y down) to NDC on the near plane
///
/// Returns `(x, y, -1)` with x and y in [-1, 1] and y pointing up.
pub fn screen_to_ndc(screen_x: f32, screen_y: f32, width: f32, height: f32) -> Vec3 {
    Vec3::new(
        (screen_x * 2.0) / width - 1.0,
        1.0 - (screen_y * 2.0) / height,
        -1.0,
    )
}

/// Unproject a cursor position to a world-space point one unit in front of the camera
///
/// `view` is the camera node's world inverse matrix. The result is
/// `normalize(world_direction) + camera_position`, a point rather than a
/// direction; form the ray direction as `normalize(result - camera_position)`
/// or use [`ray_from_screen`].
///
/// A singular `projection` (near == far, zero fov) gives a meaningless result.
pub fn unproject(
    screen_x: f32,
    screen_y: f32,
    width: f32,
    height: f32,
    projection: &Mat4,
    view: &Mat4,
    camera_position: Vec3,
) -> Vec3 {
    let ndc = screen_to_ndc(screen_x, screen_y, width, height);

    // Forward is -Z, so the near plane sits at z = -1
    let clip = Vec4::new(ndc.x, ndc.y, -1.0, 1.0);

    // Keep only the eye-space heading; w = 0 makes it a direction
    let eye = projection.inverse().mul_vec4(clip);
    let eye = Vec4::new(eye.x, eye.y, -1.0, 0.0);

    let world = view.inverse().mul_vec4(eye).truncate();

    world.normalize() + camera_position
}

/// Build the picking ray for a cursor position
///
/// The ray starts at the unprojected point and heads away from the camera.
pub fn ray_from_screen(
    screen_x: f32,
    screen_y: f32,
    width: f32,
    height: f32,
    projection: &Mat4,
    view: &Mat4,
    camera_position: Vec3,
) -> Ray {
    let point = unproject(
        screen_x,
        screen_y,
        width,
        height,
        projection,
        view,
        camera_position,
    );
    Ray::new(point, (point - camera_position).normalize())
}
