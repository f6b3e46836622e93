//! Ray vs sphere tests

use super::Ray;
use kestrel_core::Vec3;
use serde::{Deserialize, Serialize};

/// Which quadratic the sphere test solves
///
/// `Geometric` is the textbook ray/sphere intersection and returns the true
/// distance along the ray. `Legacy` reproduces the older picking formula
/// bit for bit: the quadratic is built from `origin - direction`, so the
/// sphere center never enters it, and the roots are not halved. Scenes whose
/// picking behavior was tuned against that formula can opt back into it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SphereFormula {
    #[default]
    Geometric,
    Legacy,
}

impl SphereFormula {
    fn root_scale(self) -> f32 {
        match self {
            SphereFormula::Geometric => 0.5,
            SphereFormula::Legacy => 1.0,
        }
    }
}

/// Intersect `ray` with a sphere
///
/// Returns the distance along the ray to the nearest intersection in front
/// of the origin, `Some(0.0)` when the origin lies inside the sphere, or
/// `None` on a miss. `ray.direction` must be unit length.
pub fn intersect(ray: &Ray, center: Vec3, radius: f32, formula: SphereFormula) -> Option<f32> {
    debug_assert!(
        ray.is_normalized(),
        "ray direction must be normalized, got length {}",
        ray.direction.length()
    );

    let offset = match formula {
        SphereFormula::Geometric => ray.origin - center,
        SphereFormula::Legacy => ray.origin - ray.direction,
    };

    // a == 1 for a unit direction
    let b = 2.0 * ray.direction.dot(offset);
    let c = offset.dot(offset) - radius * radius;
    let discriminant = b * b - 4.0 * c;

    if discriminant < 0.0 {
        return None;
    }

    let scale = formula.root_scale();

    if discriminant == 0.0 {
        let t = -b * scale;
        return (t >= 0.0).then_some(t);
    }

    // NaN discriminants fall through to a miss
    if discriminant > 0.0 {
        let root = discriminant.sqrt();
        let near = (-b - root) * scale;
        let far = (-b + root) * scale;

        return if near < 0.0 && far < 0.0 {
            // Sphere entirely behind the origin
            None
        } else if near > 0.0 && far > 0.0 {
            Some(near)
        } else {
            // Origin inside or on the sphere
            Some(0.0)
        };
    }

    None
}

/// Cheap hit test: is the sphere in front of the ray and within `radius` of its line?
///
/// `Legacy` keeps the older front test, which compares against the ray
/// origin instead of its direction.
pub fn passes_through(ray: &Ray, center: Vec3, radius: f32, formula: SphereFormula) -> bool {
    let to_sphere = center - ray.origin;
    let line_distance = to_sphere.cross(ray.direction).length();

    let in_front = match formula {
        SphereFormula::Geometric => to_sphere.dot(ray.direction) > 0.0,
        SphereFormula::Legacy => to_sphere.dot(ray.origin) > 0.0,
    };

    in_front && line_distance < radius
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_z() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_hit_returns_near_distance() {
        let hit = intersect(&down_z(), Vec3::ZERO, 1.0, SphereFormula::Geometric);
        assert!((hit.unwrap() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_offset_sphere_misses() {
        let hit = intersect(
            &down_z(),
            Vec3::new(5.0, 5.0, 0.0),
            1.0,
            SphereFormula::Geometric,
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn test_sphere_behind_origin_misses() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(
            intersect(&ray, Vec3::ZERO, 1.0, SphereFormula::Geometric),
            None
        );
    }

    #[test]
    fn test_origin_inside_sphere_is_zero() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(
            intersect(&ray, Vec3::ZERO, 2.0, SphereFormula::Geometric),
            Some(0.0)
        );
    }

    #[test]
    fn test_tangent_ray_single_root() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = intersect(&ray, Vec3::ZERO, 1.0, SphereFormula::Geometric);
        assert_eq!(hit, Some(5.0));
    }

    #[test]
    fn test_legacy_ignores_center() {
        let at_origin = intersect(&down_z(), Vec3::ZERO, 1.0, SphereFormula::Legacy);
        let far_away = intersect(
            &down_z(),
            Vec3::new(5.0, 5.0, 0.0),
            1.0,
            SphereFormula::Legacy,
        );
        assert_eq!(at_origin, Some(10.0));
        assert_eq!(at_origin, far_away);
    }

    #[test]
    fn test_nan_input_misses() {
        let nan_center = Vec3::new(f32::NAN, 0.0, 0.0);
        assert_eq!(
            intersect(&down_z(), nan_center, 1.0, SphereFormula::Geometric),
            None
        );
        assert_eq!(
            intersect(&down_z(), Vec3::ZERO, f32::NAN, SphereFormula::Geometric),
            None
        );
        assert_eq!(
            intersect(&down_z(), Vec3::ZERO, f32::NAN, SphereFormula::Legacy),
            None
        );
    }

    // Legacy offsets by the direction: from (0,0,5) looking down -z the
    // quadratic is t^2 - 12t + 36 - r^2, so the roots are 12 -/+ 2r.

    #[test]
    fn test_legacy_tangent_root_is_not_halved() {
        let hit = intersect(&down_z(), Vec3::ZERO, 0.0, SphereFormula::Legacy);
        assert_eq!(hit, Some(12.0));
    }

    #[test]
    fn test_legacy_straddling_roots_are_zero() {
        let hit = intersect(&down_z(), Vec3::ZERO, 7.0, SphereFormula::Legacy);
        assert_eq!(hit, Some(0.0));
    }

    #[test]
    fn test_legacy_near_root_at_origin_is_zero() {
        // r = 6 puts the near root at exactly 0
        let hit = intersect(&down_z(), Vec3::ZERO, 6.0, SphereFormula::Legacy);
        assert_eq!(hit, Some(0.0));
    }

    #[test]
    fn test_legacy_roots_behind_miss() {
        // Looking up +z the roots are -8 -/+ 2r
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(
            intersect(&ray, Vec3::ZERO, 1.0, SphereFormula::Legacy),
            None
        );
    }

    #[test]
    fn test_passes_through_front_sphere() {
        assert!(passes_through(
            &down_z(),
            Vec3::ZERO,
            1.0,
            SphereFormula::Geometric
        ));
        assert!(!passes_through(
            &down_z(),
            Vec3::new(0.0, 2.0, 0.0),
            1.0,
            SphereFormula::Geometric
        ));
    }

    #[test]
    fn test_passes_through_rejects_sphere_behind() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!passes_through(
            &ray,
            Vec3::ZERO,
            1.0,
            SphereFormula::Geometric
        ));
    }

    #[test]
    fn test_legacy_front_test_uses_origin() {
        // to_sphere . origin = (0,0,-5).(0,0,5) < 0
        assert!(!passes_through(
            &down_z(),
            Vec3::ZERO,
            1.0,
            SphereFormula::Legacy
        ));
    }

    #[test]
    fn test_formula_from_toml_name() {
        #[derive(Deserialize)]
        struct Wrapper {
            formula: SphereFormula,
        }
        let w: Wrapper = toml::from_str("formula = \"legacy\"").unwrap();
        assert_eq!(w.formula, SphereFormula::Legacy);
        assert_eq!(SphereFormula::default(), SphereFormula::Geometric);
    }
}
