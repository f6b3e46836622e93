//! Spinning-spheres picking demo
//!
//! Builds `root -> group -> spheres` plus a camera node under the root,
//! spins the group, flies the camera, and picks spheres under the cursor.
//! Rendering is left to the host: [`DemoScene::draw_list`] hands out one
//! world matrix and color per sphere.

use crate::config::SceneConfig;
use crate::controls::{FlyController, InputSnapshot};
use crate::error::Result;
use crate::picking::{FrameOutcome, PickCandidate, PickingContext};
use crate::scene::{Node, NodeId, PerspectiveCamera, SceneTree, Viewport};
use kestrel_core::{Mat4, Quat, Vec3};
use tracing::debug;

/// RGB color, components in [0, 1]
pub type Rgb = [f32; 3];

/// Color drawn for the selected sphere
pub const SELECTED_COLOR: Rgb = [1.0, 1.0, 1.0];

/// One sphere to draw this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    pub world_matrix: Mat4,
    pub color: Rgb,
}

#[derive(Clone, Copy, Debug)]
struct Sphere {
    node: NodeId,
    color: Rgb,
}

/// The demo scene and its per-frame state
#[derive(Clone, Debug)]
pub struct DemoScene {
    tree: SceneTree,
    root: NodeId,
    group: NodeId,
    camera_node: NodeId,
    spheres: Vec<Sphere>,

    camera: PerspectiveCamera,
    viewport: Viewport,
    controller: FlyController,
    picking: PickingContext,
    sphere_radius: f32,

    group_spin: f32,
    group_yaw: f32,
    selected: Option<usize>,
}

impl DemoScene {
    /// Build the scene described by `config`
    pub fn new(config: &SceneConfig) -> Result<Self> {
        config.validate()?;

        let mut tree = SceneTree::new();
        let root = tree.insert(Node::named("root"));
        let group = tree.insert_child(root, Node::named("group"))?;

        let mut spheres = Vec::with_capacity(config.spheres.len());
        for (i, sphere) in config.spheres.iter().enumerate() {
            let node = Node::named(format!("sphere_{i}"))
                .with_position(Vec3::from_array(sphere.position));
            let node = tree.insert_child(group, node)?;
            spheres.push(Sphere {
                node,
                color: sphere.color,
            });
        }

        let camera_position = Vec3::from_array(config.camera.position);
        let camera_node =
            tree.insert_child(root, Node::named("camera").with_position(camera_position))?;

        let viewport = config.viewport.to_viewport();
        let camera = config.camera.to_camera(viewport);

        let mut controller = FlyController::new(camera_position);
        controller.speed = config.controls.speed;
        controller.yaw_speed = config.controls.yaw_speed;
        controller.pitch_speed = config.controls.pitch_speed;
        controller.pitch_limit = config.controls.pitch_limit;

        tree.update_hierarchy(root)?;
        debug!(spheres = spheres.len(), "demo scene built");

        Ok(Self {
            tree,
            root,
            group,
            camera_node,
            spheres,
            camera,
            viewport,
            controller,
            picking: PickingContext::new(config.picking.formula),
            sphere_radius: config.picking.sphere_radius,
            group_spin: config.group_spin,
            group_yaw: 0.0,
            selected: None,
        })
    }

    /// Advance one frame
    ///
    /// Order: group spin and camera controller write local transforms, the
    /// hierarchy is updated, then the pick runs against fresh world matrices.
    pub fn step(&mut self, dt: f32, input: &InputSnapshot) -> Result<FrameOutcome> {
        self.group_yaw = (self.group_yaw + dt * self.group_spin) % 360.0;
        if let Some(group) = self.tree.get_mut(self.group) {
            group.rotation = Quat::from_axis_deg(self.group_yaw, Vec3::UP);
        }

        let transform = self.controller.update(dt, input);
        if let Some(camera) = self.tree.get_mut(self.camera_node) {
            transform.apply_to(camera);
        }

        self.tree.update_hierarchy(self.root)?;

        let outcome = self.picking.pick_frame(
            &self.tree,
            &self.camera,
            self.camera_node,
            self.viewport,
            &self.candidates(),
            input,
        )?;
        outcome.selection.apply(&mut self.selected);

        Ok(outcome)
    }

    /// Pick candidates from the current world matrices
    pub fn candidates(&self) -> Vec<PickCandidate> {
        let nodes: Vec<NodeId> = self.spheres.iter().map(|s| s.node).collect();
        PickCandidate::from_nodes(&self.tree, &nodes, self.sphere_radius)
    }

    /// World matrix and color for every sphere, selected one in white
    pub fn draw_list(&self) -> Vec<DrawItem> {
        self.spheres
            .iter()
            .enumerate()
            .filter_map(|(i, sphere)| {
                let world_matrix = self.tree.world_matrix(sphere.node)?;
                let color = if self.selected == Some(i) {
                    SELECTED_COLOR
                } else {
                    sphere.color
                };
                Some(DrawItem {
                    world_matrix,
                    color,
                })
            })
            .collect()
    }

    /// Match the camera to a resized window
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_viewport(viewport);
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn camera_node(&self) -> NodeId {
        self.camera_node
    }

    pub fn controller(&self) -> &FlyController {
        &self.controller
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current group rotation about world up, degrees
    pub fn group_yaw(&self) -> f32 {
        self.group_yaw
    }

    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picking::Selection;
    use kestrel_core::Vec2;

    fn still_scene() -> DemoScene {
        let config = SceneConfig {
            group_spin: 0.0,
            ..SceneConfig::default()
        };
        DemoScene::new(&config).unwrap()
    }

    #[test]
    fn test_layout() {
        let scene = still_scene();
        assert_eq!(scene.sphere_count(), 4);
        assert_eq!(scene.tree().len(), 7);
        assert_eq!(scene.tree().find("camera"), Some(scene.camera_node()));

        let items = scene.draw_list();
        assert_eq!(items[1].color, [0.0, 1.0, 0.0]);
        assert!(items[1]
            .world_matrix
            .translation_part()
            .abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn test_group_spins() {
        let mut scene = DemoScene::new(&SceneConfig::default()).unwrap();
        scene.step(9.0, &InputSnapshot::new()).unwrap();
        assert!((scene.group_yaw() - 90.0).abs() < 1e-3);

        // Sphere at (2, 0, 0) rotated 90 degrees about +Y lands at (0, 0, -2)
        let items = scene.draw_list();
        assert!(items[1]
            .world_matrix
            .translation_part()
            .abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), 1e-4));
    }

    #[test]
    fn test_click_center_selects_front_sphere() {
        let mut scene = still_scene();
        let (cx, cy) = scene.viewport().center();
        // Camera sits at y = 1; aim level with the spheres by moving down
        let mut input = InputSnapshot {
            keys: crate::controls::KeyState {
                down: true,
                ..Default::default()
            },
            ..InputSnapshot::default()
        };
        scene.step(1.0 / 7.0, &input).unwrap();

        input = InputSnapshot {
            pick_pressed: true,
            ..InputSnapshot::focused_at(Vec2::new(cx, cy))
        };
        let outcome = scene.step(0.0, &input).unwrap();

        assert!(matches!(outcome.selection, Selection::Picked(hit) if hit.index == 0));
        assert_eq!(scene.selected(), Some(0));
        assert_eq!(scene.draw_list()[0].color, SELECTED_COLOR);
        assert_eq!(scene.draw_list()[1].color, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_click_on_sky_clears_selection() {
        let mut scene = still_scene();
        scene.selected = Some(2);

        let input = InputSnapshot {
            pick_pressed: true,
            ..InputSnapshot::focused_at(Vec2::new(0.0, 0.0))
        };
        scene.step(0.0, &input).unwrap();
        assert_eq!(scene.selected(), None);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut scene = still_scene();
        scene.set_viewport(Viewport::new(600.0, 600.0));
        assert!((scene.camera().aspect - 1.0).abs() < 1e-6);
    }
}
