//! Prelude module for convenient imports
//!
//! ```ignore
//! use kestrel_3d::prelude::*;
//! ```

pub use crate::config::SceneConfig;
pub use crate::controls::{CursorTracker, FlyController, InputSnapshot, KeyState};
pub use crate::demo::{DemoScene, DrawItem};
pub use crate::error::{Result, SceneError};
pub use crate::picking::{
    intersect, pick, pick_index, ray_from_screen, unproject, FrameOutcome, PickCandidate,
    PickHit, PickingContext, Ray, Selection, SphereFormula,
};
pub use crate::scene::{Node, NodeId, PerspectiveCamera, SceneTree, Viewport};

pub use kestrel_core::{Mat4, Quat, Vec2, Vec3, Vec4};
