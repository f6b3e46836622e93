//! # Kestrel 3D
//!
//! Scene-graph transforms and cursor picking.
//!
//! This crate provides:
//! - **Scene graph** of nodes with local TRS transforms and cached world matrices
//! - **Hierarchy updates** that propagate world and world-inverse matrices parent-first
//! - **Picking** that unprojects the cursor and selects the nearest sphere
//! - **Fly controls** driven by a per-frame input snapshot
//! - **Demo scene** of spinning spheres, configurable from TOML
//!
//! ## Quick Start
//!
//! ```rust
//! use kestrel_3d::prelude::*;
//!
//! let mut tree = SceneTree::new();
//! let root = tree.insert(Node::at(0.0, 0.0, -5.0));
//! let ball = tree.insert_child(root, Node::at(1.0, 0.0, 0.0)).unwrap();
//! tree.update_hierarchy(root).unwrap();
//!
//! let center = tree.world_position(ball).unwrap();
//! let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
//! let hit = pick(&ray, &[PickCandidate::new(0, center, 1.0)], SphereFormula::Geometric);
//! assert_eq!(hit.map(|h| h.index), Some(0));
//! ```

// Error types
pub mod error;

// Scene graph
pub mod scene;

// Ray casting and selection
pub mod picking;

// Camera controls and input
pub mod controls;

// Scene files
pub mod config;

// Spinning-spheres demo
pub mod demo;

// Prelude for common imports
pub mod prelude;

pub use config::SceneConfig;
pub use demo::{DemoScene, DrawItem};
pub use error::{Result, SceneError};
pub use picking::{PickCandidate, PickHit, PickingContext, Ray, SphereFormula};
pub use scene::{Node, NodeId, PerspectiveCamera, SceneTree, Viewport};
