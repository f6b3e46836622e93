use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kestrel_3d::picking::{intersect, pick, ray_from_screen, PickCandidate, Ray, SphereFormula};
use kestrel_3d::scene::{Node, SceneTree};
use kestrel_core::{Mat4, Vec3};

fn intersect_benchmark(c: &mut Criterion) {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
    c.bench_function("ray_sphere_intersect", |b| {
        b.iter(|| {
            black_box(intersect(
                black_box(&ray),
                black_box(Vec3::ZERO),
                1.0,
                SphereFormula::Geometric,
            ))
        })
    });
}

fn unproject_benchmark(c: &mut Criterion) {
    let projection = Mat4::perspective_rh_gl(67f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0);
    let view = Mat4::from_translation(Vec3::new(0.0, -1.0, -6.0));
    let camera = Vec3::new(0.0, 1.0, 6.0);

    c.bench_function("ray_from_screen", |b| {
        b.iter(|| {
            black_box(ray_from_screen(
                black_box(640.0),
                black_box(360.0),
                1280.0,
                720.0,
                &projection,
                &view,
                camera,
            ))
        })
    });
}

fn pick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick");
    let ray = Ray::new(Vec3::new(0.0, 0.0, 50.0), Vec3::new(0.0, 0.0, -1.0));

    for count in [4, 64, 1024].iter() {
        let candidates: Vec<PickCandidate> = (0..*count)
            .map(|i| {
                let x = (i % 32) as f32 * 2.5 - 40.0;
                let y = (i / 32) as f32 * 2.5 - 40.0;
                PickCandidate::new(i, Vec3::new(x, y, 0.0), 1.0)
            })
            .collect();

        group.bench_function(format!("{}_spheres", count), |b| {
            b.iter(|| black_box(pick(&ray, black_box(&candidates), SphereFormula::Geometric)))
        });
    }
    group.finish();
}

fn hierarchy_benchmark(c: &mut Criterion) {
    let mut tree = SceneTree::new();
    let root = tree.spawn();
    let mut parent = root;
    for depth in 0..8 {
        let level = tree
            .insert_child(parent, Node::at(0.0, depth as f32, 0.0))
            .unwrap();
        for i in 0..16 {
            tree.insert_child(level, Node::at(i as f32, 0.0, 0.0)).unwrap();
        }
        parent = level;
    }

    c.bench_function("update_hierarchy_137_nodes", |b| {
        b.iter(|| black_box(tree.update_hierarchy(root)))
    });
}

criterion_group!(
    benches,
    intersect_benchmark,
    unproject_benchmark,
    pick_benchmark,
    hierarchy_benchmark
);
criterion_main!(benches);
