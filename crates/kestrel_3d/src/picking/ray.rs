//! Ray type for picking queries

use kestrel_core::Vec3;

/// Tolerance on `|direction| - 1` accepted by the intersection routines
pub const UNIT_TOLERANCE: f32 = 1e-3;

/// Ray for picking
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,
    /// Ray direction (must be normalized for intersection tests)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray from two points
    pub fn from_points(from: Vec3, to: Vec3) -> Self {
        let dir = to - from;
        let direction = if dir.length() > 0.0001 {
            dir.normalize()
        } else {
            Vec3::FORWARD
        };
        Self {
            origin: from,
            direction,
        }
    }

    /// Get point along ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Whether the direction is unit length within [`UNIT_TOLERANCE`]
    pub fn is_normalized(&self) -> bool {
        (self.direction.length() - 1.0).abs() < UNIT_TOLERANCE
    }

    /// Segment from the origin one unit along the direction
    ///
    /// Hosts draw this as a debug arrow.
    pub fn debug_segment(&self) -> (Vec3, Vec3) {
        (self.origin, self.origin + self.direction.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        let point = ray.point_at(5.0);
        assert!((point.z - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_ray_from_points() {
        let ray = Ray::from_points(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 10.0));
        assert!((ray.direction.z - 1.0).abs() < 0.001);
        assert!(ray.is_normalized());
    }

    #[test]
    fn test_debug_segment_is_unit() {
        let ray = Ray::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(0.0, 3.0, 0.0));
        let (from, to) = ray.debug_segment();
        assert_eq!(from, Vec3::new(1.0, 1.0, 1.0));
        assert!(to.abs_diff_eq(Vec3::new(1.0, 2.0, 1.0), 1e-6));
    }
}
