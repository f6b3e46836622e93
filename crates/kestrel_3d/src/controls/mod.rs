//! Camera controls and per-frame input
//!
//! - [`InputSnapshot`] - everything a frame needs to know about the user
//! - [`CursorTracker`] - cursor deltas that survive focus changes
//! - [`FlyController`] - free-flight mouse look and keyboard movement

mod fly;
mod input;

pub use fly::{CameraTransform, FlyController};
pub use input::{CursorTracker, InputSnapshot, KeyState};
