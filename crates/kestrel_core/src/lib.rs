//! Kestrel Core
//!
//! Foundational math for the Kestrel scene graph:
//!
//! - **Vectors**: [`Vec2`], [`Vec3`], [`Vec4`] with the usual arithmetic operators
//! - **Matrices**: column-major [`Mat4`] with composition, inversion and projection builders
//! - **Rotations**: unit [`Quat`] quaternions
//! - **Numerics**: epsilon-guarded reciprocals for building inverse scale matrices
//!
//! # Example
//!
//! ```rust
//! use kestrel_core::{Mat4, Quat, Vec3};
//!
//! let t = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
//! let r = Quat::from_axis_deg(90.0, Vec3::UP).to_mat4();
//! let m = t.mul(&r);
//!
//! let p = m.transform_point(Vec3::new(1.0, 0.0, 0.0));
//! assert!((p.z - 2.0).abs() < 1e-5);
//! ```

pub mod math;

pub use math::{safe_recip, Mat4, Quat, Vec2, Vec3, Vec4, EPSILON};
