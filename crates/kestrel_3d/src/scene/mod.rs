//! Scene graph: transform nodes, their arena, and the camera model

mod camera;
mod node;
mod tree;

pub use camera::{PerspectiveCamera, Viewport};
pub use node::{Node, NodeAxes};
pub use tree::SceneTree;

slotmap::new_key_type! {
    /// Key of a node inside a [`SceneTree`]
    pub struct NodeId;
}
