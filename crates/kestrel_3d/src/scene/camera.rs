//! Camera model

use super::Node;
use kestrel_core::Mat4;

/// Size of the render target in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Pixel coordinate of the viewport center
    pub fn center(&self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Perspective camera for 3D rendering and picking
///
/// Holds projection parameters only. Position and orientation come from the
/// [`Node`] the camera is attached to; its world inverse matrix is the view
/// matrix.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    /// Field of view in radians (vertical)
    pub fov: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::from_degrees(67.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}

impl PerspectiveCamera {
    /// Create a new perspective camera
    ///
    /// # Arguments
    /// * `fov` - Field of view in radians (vertical)
    /// * `aspect` - Aspect ratio (width / height)
    /// * `near` - Near clipping plane
    /// * `far` - Far clipping plane
    ///
    /// `near` must differ from `far` and `fov` must be positive, otherwise the
    /// projection is singular and unprojection is meaningless.
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        debug_assert!(fov > 0.0, "fov must be positive");
        debug_assert!(near != far, "near and far planes must differ");
        Self {
            fov,
            aspect,
            near,
            far,
        }
    }

    /// Create with the vertical field of view given in degrees
    pub fn from_degrees(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::new(fov_degrees.to_radians(), aspect, near, far)
    }

    /// Set aspect ratio
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Match the aspect ratio to a resized viewport
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Compute projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far)
    }

    /// View matrix for a camera carried by `node`
    pub fn view_matrix(&self, node: &Node) -> Mat4 {
        *node.world_inverse_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_core::{Vec3, Vec4};

    #[test]
    fn test_projection_center_axis() {
        let camera = PerspectiveCamera::default();
        let clip = camera.projection_matrix() * Vec4::new(0.0, 0.0, -10.0, 1.0);
        assert!((clip.x).abs() < 1e-6);
        assert!((clip.y).abs() < 1e-6);
        assert!((clip.w - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_set_viewport_updates_aspect() {
        let mut camera = PerspectiveCamera::default();
        camera.set_viewport(Viewport::new(800.0, 400.0));
        assert!((camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_view_matrix_is_node_world_inverse() {
        let mut tree = crate::scene::SceneTree::new();
        let id = tree.insert(Node::at(0.0, 1.0, 6.0));
        tree.update_hierarchy(id).unwrap();

        let camera = PerspectiveCamera::default();
        let view = camera.view_matrix(tree.get(id).unwrap());
        let eye = view.transform_point(Vec3::new(0.0, 1.0, 6.0));
        assert!(eye.abs_diff_eq(Vec3::ZERO, 1e-6));
    }
}
