//! Cursor picking against spheres
//!
//! A pick runs in four steps:
//!
//! 1. [`unproject`] maps the cursor to a world point one unit ahead of the camera
//! 2. [`ray_from_screen`] turns that point into a [`Ray`] leaving the camera
//! 3. [`intersect`] tests the ray against each [`PickCandidate`]
//! 4. [`pick`] keeps the closest hit
//!
//! [`PickingContext::pick_frame`] wires the steps to a frame's input.

mod context;
mod intersect;
mod ray;
mod selector;
mod unproject;

pub use context::{FrameOutcome, PickingContext, Selection};
pub use intersect::{intersect, passes_through, SphereFormula};
pub use ray::{Ray, UNIT_TOLERANCE};
pub use selector::{pick, pick_index, PickCandidate, PickHit, DEFAULT_SPHERE_RADIUS};
pub use unproject::{ray_from_screen, screen_to_ndc, unproject};
