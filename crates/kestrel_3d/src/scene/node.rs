//! Transform node

use super::NodeId;
use kestrel_core::{safe_recip, Mat4, Quat, Vec3};
use smallvec::SmallVec;

/// World-space basis of a node, read from the columns of its world matrix
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeAxes {
    /// Origin of the node (translation column)
    pub position: Vec3,
    /// Local +X in world space (column 0, carries scale)
    pub side: Vec3,
    /// Local +Y in world space (column 1, carries scale)
    pub up: Vec3,
    /// Local +Z in world space (column 2, carries scale)
    pub forward: Vec3,
}

/// A node in the scene graph
///
/// Stores the local transform (position, rotation, scale) and the matrices
/// derived from it by the last hierarchy update. Editing the TRS fields does
/// not recompute anything; matrices are refreshed by
/// [`SceneTree::update_hierarchy`](super::SceneTree::update_hierarchy).
#[derive(Clone, Debug)]
pub struct Node {
    /// Local position relative to parent
    pub position: Vec3,
    /// Local rotation as a unit quaternion
    pub rotation: Quat,
    /// Local scale
    pub scale: Vec3,
    name: Option<String>,

    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,

    local_matrix: Mat4,
    world_matrix: Mat4,
    local_inverse_matrix: Mat4,
    world_inverse_matrix: Mat4,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            name: None,
            parent: None,
            children: SmallVec::new(),
            local_matrix: Mat4::IDENTITY,
            world_matrix: Mat4::IDENTITY,
            local_inverse_matrix: Mat4::IDENTITY,
            world_inverse_matrix: Mat4::IDENTITY,
        }
    }
}

impl Node {
    /// Create a node with the identity transform
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a named node with the identity transform
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Create with position
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            ..Default::default()
        }
    }

    /// Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Replace the whole local transform
    pub fn set_local_transform(&mut self, position: Vec3, rotation: Quat, scale: Vec3) {
        self.position = position;
        self.rotation = rotation;
        self.scale = scale;
    }

    /// Name used for lookup and logging, fixed at construction
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Parent node, if attached
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Check if this is a root node
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn local_matrix(&self) -> &Mat4 {
        &self.local_matrix
    }

    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    pub fn local_inverse_matrix(&self) -> &Mat4 {
        &self.local_inverse_matrix
    }

    pub fn world_inverse_matrix(&self) -> &Mat4 {
        &self.world_inverse_matrix
    }

    /// World position from the last update
    pub fn world_position(&self) -> Vec3 {
        self.world_matrix.translation_part()
    }

    /// World-space basis from the last update
    pub fn world_axes(&self) -> NodeAxes {
        NodeAxes {
            position: self.world_matrix.translation_part(),
            side: self.world_matrix.col(0).truncate(),
            up: self.world_matrix.col(1).truncate(),
            forward: self.world_matrix.col(2).truncate(),
        }
    }

    /// `T(position) * R(rotation) * S(scale)`
    pub fn compute_local_matrix(&self) -> Mat4 {
        let translation = Mat4::from_translation(self.position);
        let rotation = self.rotation.to_mat4();
        let scale = Mat4::from_scale(self.scale);
        translation.mul(&rotation).mul(&scale)
    }

    /// `S^-1 * R^T * T^-1`, with each scale axis inverted through [`safe_recip`]
    pub fn compute_local_inverse_matrix(&self) -> Mat4 {
        let inv_scale = Mat4::scale(
            safe_recip(self.scale.x),
            safe_recip(self.scale.y),
            safe_recip(self.scale.z),
        );
        let inv_rotation = self.rotation.to_mat4().transpose();
        let inv_translation = Mat4::from_translation(-self.position);
        inv_scale.mul(&inv_rotation).mul(&inv_translation)
    }

    /// Refresh the local matrix pair from the TRS fields
    pub(crate) fn update_local(&mut self) {
        self.local_matrix = self.compute_local_matrix();
        self.local_inverse_matrix = self.compute_local_inverse_matrix();
    }

    /// Compose the world matrix pair from the parent's (roots copy the local pair)
    ///
    /// The inverse is composed parent-first, `parent_world_inverse * local_inverse`.
    /// That inverts `world` whenever the parent's world matrix commutes with the
    /// local one, which covers identity parents and translation-only chains.
    pub(crate) fn update_world(&mut self, parent: Option<(Mat4, Mat4)>) {
        match parent {
            Some((parent_world, parent_world_inverse)) => {
                self.world_matrix = parent_world.mul(&self.local_matrix);
                self.world_inverse_matrix = parent_world_inverse.mul(&self.local_inverse_matrix);
            }
            None => {
                self.world_matrix = self.local_matrix;
                self.world_inverse_matrix = self.local_inverse_matrix;
            }
        }
    }
}
