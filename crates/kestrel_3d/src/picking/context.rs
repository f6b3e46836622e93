//! Frame-driven picking
//!
//! Replaces click callbacks: the host passes the frame's input and gets the
//! selection change back, after the hierarchy has been updated.

use super::{pick, ray_from_screen, PickCandidate, PickHit, Ray, SphereFormula};
use crate::controls::InputSnapshot;
use crate::error::{Result, SceneError};
use crate::scene::{NodeId, PerspectiveCamera, SceneTree, Viewport};
use kestrel_core::Vec3;
use tracing::{debug, info};

/// What a pick request did to the selection
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Selection {
    /// No pick was requested this frame
    #[default]
    Unchanged,
    /// A pick was requested and hit nothing
    Cleared,
    /// A pick was requested and hit a candidate
    Picked(PickHit),
}

impl Selection {
    /// Apply to a stored selection index
    pub fn apply(&self, selected: &mut Option<usize>) {
        match self {
            Selection::Unchanged => {}
            Selection::Cleared => *selected = None,
            Selection::Picked(hit) => *selected = Some(hit.index),
        }
    }
}

/// Result of [`PickingContext::pick_frame`]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameOutcome {
    pub selection: Selection,
    /// Debug arrow requested with the ray debug key
    pub debug_segment: Option<(Vec3, Vec3)>,
}

/// Picking settings plus the per-frame entry point
#[derive(Clone, Copy, Debug, Default)]
pub struct PickingContext {
    pub formula: SphereFormula,
}

impl PickingContext {
    pub fn new(formula: SphereFormula) -> Self {
        Self { formula }
    }

    /// World-space ray under the cursor for a camera carried by `camera_node`
    pub fn cursor_ray(
        &self,
        tree: &SceneTree,
        camera: &PerspectiveCamera,
        camera_node: NodeId,
        viewport: Viewport,
        input: &InputSnapshot,
    ) -> Result<Ray> {
        let node = tree
            .get(camera_node)
            .ok_or(SceneError::NodeNotFound(camera_node))?;

        Ok(ray_from_screen(
            input.cursor.x,
            input.cursor.y,
            viewport.width,
            viewport.height,
            &camera.projection_matrix(),
            &camera.view_matrix(node),
            node.world_position(),
        ))
    }

    /// Handle this frame's pick and ray-debug requests
    ///
    /// World matrices are read as they stand; update the hierarchy before
    /// calling. Nothing happens while input is disabled.
    pub fn pick_frame(
        &self,
        tree: &SceneTree,
        camera: &PerspectiveCamera,
        camera_node: NodeId,
        viewport: Viewport,
        candidates: &[PickCandidate],
        input: &InputSnapshot,
    ) -> Result<FrameOutcome> {
        let mut outcome = FrameOutcome::default();
        if !input.input_enabled || !(input.pick_pressed || input.ray_debug_pressed) {
            return Ok(outcome);
        }

        let ray = self.cursor_ray(tree, camera, camera_node, viewport, input)?;

        if input.pick_pressed {
            outcome.selection = match pick(&ray, candidates, self.formula) {
                Some(hit) => {
                    info!(index = hit.index, distance = hit.distance, "picked");
                    Selection::Picked(hit)
                }
                None => {
                    info!("selection cleared");
                    Selection::Cleared
                }
            };
        }

        if input.ray_debug_pressed {
            debug!(origin = ?ray.origin, direction = ?ray.direction, "debug ray");
            outcome.debug_segment = Some(ray.debug_segment());
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Node;
    use kestrel_core::Vec2;

    fn scene() -> (SceneTree, NodeId) {
        let mut tree = SceneTree::new();
        let camera = tree.insert(Node::at(0.0, 0.0, 5.0));
        tree.update_hierarchy(camera).unwrap();
        (tree, camera)
    }

    fn click(cursor: Vec2) -> InputSnapshot {
        InputSnapshot {
            pick_pressed: true,
            ..InputSnapshot::focused_at(cursor)
        }
    }

    #[test]
    fn test_center_click_hits_sphere_ahead() {
        let (tree, camera_node) = scene();
        let viewport = Viewport::new(800.0, 600.0);
        let camera = PerspectiveCamera::default().with_aspect(viewport.aspect());
        let candidates = [PickCandidate::new(0, Vec3::ZERO, 1.0)];

        let outcome = PickingContext::default()
            .pick_frame(
                &tree,
                &camera,
                camera_node,
                viewport,
                &candidates,
                &click(Vec2::new(400.0, 300.0)),
            )
            .unwrap();

        match outcome.selection {
            Selection::Picked(hit) => {
                assert_eq!(hit.index, 0);
                // Ray starts one unit ahead of the camera
                assert!((hit.distance - 3.0).abs() < 1e-4);
            }
            other => panic!("expected a hit, got {other:?}"),
        }
        assert_eq!(outcome.debug_segment, None);
    }

    #[test]
    fn test_click_on_nothing_clears() {
        let (tree, camera_node) = scene();
        let viewport = Viewport::new(800.0, 600.0);
        let camera = PerspectiveCamera::default().with_aspect(viewport.aspect());
        let candidates = [PickCandidate::new(0, Vec3::new(20.0, 0.0, 0.0), 1.0)];

        let outcome = PickingContext::default()
            .pick_frame(
                &tree,
                &camera,
                camera_node,
                viewport,
                &candidates,
                &click(Vec2::new(400.0, 300.0)),
            )
            .unwrap();
        assert_eq!(outcome.selection, Selection::Cleared);

        let mut selected = Some(4);
        outcome.selection.apply(&mut selected);
        assert_eq!(selected, None);
    }

    #[test]
    fn test_unfocused_frame_is_ignored() {
        let (tree, camera_node) = scene();
        let mut input = click(Vec2::new(400.0, 300.0));
        input.input_enabled = false;

        let outcome = PickingContext::default()
            .pick_frame(
                &tree,
                &PerspectiveCamera::default(),
                camera_node,
                Viewport::new(800.0, 600.0),
                &[PickCandidate::new(0, Vec3::ZERO, 1.0)],
                &input,
            )
            .unwrap();
        assert_eq!(outcome, FrameOutcome::default());
    }

    #[test]
    fn test_debug_ray_segment() {
        let (tree, camera_node) = scene();
        let input = InputSnapshot {
            ray_debug_pressed: true,
            ..InputSnapshot::focused_at(Vec2::new(400.0, 300.0))
        };

        let outcome = PickingContext::default()
            .pick_frame(
                &tree,
                &PerspectiveCamera::default().with_aspect(800.0 / 600.0),
                camera_node,
                Viewport::new(800.0, 600.0),
                &[],
                &input,
            )
            .unwrap();

        assert_eq!(outcome.selection, Selection::Unchanged);
        let (from, to) = outcome.debug_segment.unwrap();
        assert!(from.abs_diff_eq(Vec3::new(0.0, 0.0, 4.0), 1e-5));
        assert!(to.abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), 1e-5));
    }

    #[test]
    fn test_missing_camera_node_errors() {
        let (mut tree, camera_node) = scene();
        tree.remove(camera_node);

        let result = PickingContext::default().pick_frame(
            &tree,
            &PerspectiveCamera::default(),
            camera_node,
            Viewport::default(),
            &[],
            &click(Vec2::ZERO),
        );
        assert!(matches!(result, Err(SceneError::NodeNotFound(_))));
    }
}
