//! End-to-end picking through a transformed hierarchy

use kestrel_3d::controls::{CursorTracker, KeyState};
use kestrel_3d::picking::Selection;
use kestrel_3d::prelude::*;

/// Pixel position of a world point, top-left origin
fn project_to_screen(
    point: Vec3,
    camera: &PerspectiveCamera,
    view: &Mat4,
    viewport: Viewport,
) -> Vec2 {
    let clip = camera.projection_matrix() * (*view * point.extend(1.0));
    let ndc = Vec3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w);
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * viewport.width,
        (1.0 - ndc.y) * 0.5 * viewport.height,
    )
}

fn build_scene() -> (SceneTree, NodeId, Vec<NodeId>, NodeId) {
    let mut tree = SceneTree::new();
    let root = tree.insert(Node::named("root"));

    let group = tree
        .insert_child(
            root,
            Node::at(0.5, -0.25, -3.0)
                .with_rotation(Quat::from_axis_deg(30.0, Vec3::UP))
                .with_scale(Vec3::new(1.5, 1.5, 1.5)),
        )
        .unwrap();

    let spheres = [
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(-2.0, 0.0, 0.0),
        Vec3::new(-2.0, 0.0, -2.0),
    ]
    .into_iter()
    .map(|p| tree.insert_child(group, Node::new().with_position(p)).unwrap())
    .collect();

    let camera = tree
        .insert_child(
            root,
            Node::at(0.7, 2.0, 7.9).with_rotation(
                Quat::from_axis_deg(10.0, Vec3::UP) * Quat::from_axis_deg(-15.0, Vec3::X),
            ),
        )
        .unwrap();

    tree.update_hierarchy(root).unwrap();
    (tree, camera, spheres, root)
}

#[test]
fn nodes_under_the_root_get_exact_inverses() {
    let (tree, camera, spheres, root) = build_scene();
    let group = tree.parent(spheres[0]).unwrap();

    for id in [root, group, camera] {
        let node = tree.get(id).unwrap();
        let product = *node.world_matrix() * *node.world_inverse_matrix();
        assert!(product.abs_diff_eq(&Mat4::IDENTITY, 1e-4), "{id:?}");
    }

    // Deeper nodes compose their inverse parent-first
    let group_inverse = *tree.get(group).unwrap().world_inverse_matrix();
    for id in spheres {
        let node = tree.get(id).unwrap();
        let expected = group_inverse * *node.local_inverse_matrix();
        assert!(node.world_inverse_matrix().abs_diff_eq(&expected, 1e-5));
    }
}

#[test]
fn clicking_a_projected_center_picks_that_sphere() {
    let (tree, camera_node, spheres, _) = build_scene();
    let viewport = Viewport::new(1024.0, 768.0);
    let camera = PerspectiveCamera::default().with_aspect(viewport.aspect());
    let view = camera.view_matrix(tree.get(camera_node).unwrap());
    let candidates = PickCandidate::from_nodes(&tree, &spheres, 0.2);
    let context = PickingContext::default();

    for candidate in &candidates {
        let cursor = project_to_screen(candidate.center, &camera, &view, viewport);
        let input = InputSnapshot {
            pick_pressed: true,
            ..InputSnapshot::focused_at(cursor)
        };

        let outcome = context
            .pick_frame(&tree, &camera, camera_node, viewport, &candidates, &input)
            .unwrap();

        match outcome.selection {
            Selection::Picked(hit) => assert_eq!(hit.index, candidate.index),
            other => panic!("sphere {} not picked: {other:?}", candidate.index),
        }
    }
}

#[test]
fn cursor_ray_passes_through_projected_point() {
    let (tree, camera_node, spheres, _) = build_scene();
    let viewport = Viewport::new(800.0, 600.0);
    let camera = PerspectiveCamera::default().with_aspect(viewport.aspect());
    let view = camera.view_matrix(tree.get(camera_node).unwrap());

    let target = tree.world_position(spheres[3]).unwrap();
    let cursor = project_to_screen(target, &camera, &view, viewport);

    let ray = PickingContext::default()
        .cursor_ray(
            &tree,
            &camera,
            camera_node,
            viewport,
            &InputSnapshot::focused_at(cursor),
        )
        .unwrap();

    assert!(ray.is_normalized());
    let along = (target - ray.origin).dot(ray.direction);
    assert!(ray.point_at(along).abs_diff_eq(target, 1e-3));
}

#[test]
fn legacy_formula_is_selectable_from_config() {
    let config = SceneConfig::from_toml_str(
        r#"
        group_spin = 0.0

        [camera]
        position = [0.0, 0.0, 6.0]

        [picking]
        formula = "legacy"
        "#,
    )
    .unwrap();
    let mut scene = DemoScene::new(&config).unwrap();

    // The legacy quadratic ignores sphere centers, so every candidate
    // scores the same distance and the first one wins
    let (cx, cy) = scene.viewport().center();
    let input = InputSnapshot {
        pick_pressed: true,
        ..InputSnapshot::focused_at(Vec2::new(cx, cy))
    };
    let outcome = scene.step(0.0, &input).unwrap();

    match outcome.selection {
        Selection::Picked(hit) => assert_eq!(hit.index, 0),
        other => panic!("expected a legacy hit, got {other:?}"),
    }
}

#[test]
fn demo_frames_from_tracked_input() {
    let mut scene = DemoScene::new(&SceneConfig::default()).unwrap();
    let mut tracker = CursorTracker::new();
    let start = scene.controller().position;

    // Focused frame then a jump while unfocused: no look change either way
    let first = tracker.snapshot(Vec2::new(10.0, 10.0), true, KeyState::new(), false, false);
    scene.step(0.016, &first).unwrap();
    let away = tracker.snapshot(Vec2::new(900.0, 10.0), false, KeyState::new(), false, false);
    scene.step(0.016, &away).unwrap();
    let back = tracker.snapshot(Vec2::new(400.0, 400.0), true, KeyState::new(), false, false);
    scene.step(0.016, &back).unwrap();
    assert_eq!(scene.controller().yaw, 0.0);

    let forward = KeyState {
        forward: true,
        ..KeyState::default()
    };
    let moving = tracker.snapshot(Vec2::new(400.0, 400.0), true, forward, false, false);
    scene.step(1.0, &moving).unwrap();

    let moved = scene.controller().position;
    assert!((start.z - moved.z - 7.0).abs() < 1e-3);
    assert_eq!(
        scene.tree().world_position(scene.camera_node()).unwrap(),
        moved
    );
}
