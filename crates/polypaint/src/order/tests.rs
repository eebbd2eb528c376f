use super::*;
use crate::geom3::{Body, Face, Polyhedron};
use crate::shapes::rand::{SampleCfg, ShapeSampler};
use crate::shapes::ShapeSpec;
use nalgebra::vector;
use proptest::prelude::*;

fn unit_cube_at(y: f64) -> Body {
    ShapeSpec::cube(vector![0.0, y, 0.0], 1.0).build().unwrap()
}

/// Flat quads at the given heights, one body each.
fn flat_quads(ys: &[f64]) -> Scene {
    ys.iter()
        .map(|&y| {
            let poly = Polyhedron::new(vec![
                vector![0.0, y, 0.0],
                vector![1.0, y, 0.0],
                vector![1.0, y, 1.0],
                vector![0.0, y, 1.0],
            ]);
            Body::new(poly, vec![Face::new(vec![0, 1, 2, 3])]).unwrap()
        })
        .collect()
}

#[test]
fn empty_scene_yields_nothing() {
    assert!(sort_faces(&Scene::default(), Axis::Y).is_empty());
}

#[test]
fn depth_key_of_mixed_face() {
    // y = {0, 0, 2, 2} on the depth axis -> key 1.0
    let poly = Polyhedron::new(vec![
        vector![0.0, 0.0, 0.0],
        vector![1.0, 0.0, 0.0],
        vector![1.0, 2.0, 0.0],
        vector![0.0, 2.0, 0.0],
    ]);
    let body = Body::new(poly, vec![Face::new(vec![0, 1, 2, 3])]).unwrap();
    let faces = sort_faces(&Scene::new(vec![body]), Axis::Y);
    assert_eq!(faces.len(), 1);
    assert!((faces[0].key - 1.0).abs() < 1e-12);
}

#[test]
fn faces_interleave_across_bodies() {
    let scene = Scene::new(vec![unit_cube_at(0.0), unit_cube_at(0.75)]);
    let order: Vec<usize> = sort_faces(&scene, Axis::Y)
        .iter()
        .map(|f| f.source.body)
        .collect();
    // Keys: body1 {1.25, .75 x4, .25}, body0 {.5, 0 x4, -.5}
    assert_eq!(order, vec![1, 1, 1, 1, 1, 0, 1, 0, 0, 0, 0, 0]);
}

#[test]
fn ties_keep_enumeration_order() {
    let scene = flat_quads(&[1.0, 2.0, 1.0, -0.0, 0.0, 2.0]);
    let refs: Vec<usize> = sort_faces(&scene, Axis::Y)
        .iter()
        .map(|f| f.source.body)
        .collect();
    assert_eq!(refs, vec![1, 5, 0, 2, 3, 4]);
}

#[test]
fn polygons_match_resolved_vertices() {
    let scene = Scene::new(vec![unit_cube_at(-2.5)]);
    for f in sort_faces(&scene, Axis::Y) {
        let body = &scene.bodies()[f.source.body];
        let face = &body.faces()[f.source.face];
        assert_eq!(f.polygon, body.polyhedron().resolve(face));
    }
}

#[test]
fn axis_choice_changes_order() {
    let body = Body::from_raw(
        &[
            [0.0, 0.0, 0.0],
            [5.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 3.0],
        ],
        &[&[0, 1, 2], &[0, 2, 3], &[0, 3, 1]],
    )
    .unwrap();
    let scene = Scene::new(vec![body]);
    let by = |axis| -> Vec<usize> {
        sort_faces(&scene, axis)
            .iter()
            .map(|f| f.source.face)
            .collect()
    };
    assert_eq!(by(Axis::X), vec![0, 2, 1]);
    assert_eq!(by(Axis::Z), vec![1, 2, 0]);
}

fn random_scene(seed: u64, n: usize) -> Scene {
    let mut s = ShapeSampler::new(SampleCfg::default(), seed).unwrap();
    Scene::new(s.sample_bodies(n).unwrap())
}

proptest! {
    #[test]
    fn sorted_descending(seed in any::<u64>(), n in 0usize..12) {
        let faces = sort_faces(&random_scene(seed, n), Axis::Y);
        for w in faces.windows(2) {
            prop_assert!(w[0].key >= w[1].key);
        }
    }

    #[test]
    fn complete_and_unique(seed in any::<u64>(), n in 0usize..12) {
        let scene = random_scene(seed, n);
        let faces = sort_faces(&scene, Axis::Y);
        prop_assert_eq!(faces.len(), scene.face_count());
        let mut refs: Vec<FaceRef> = faces.iter().map(|f| f.source).collect();
        refs.sort();
        refs.dedup();
        prop_assert_eq!(refs.len(), scene.face_count());
    }

    #[test]
    fn stable_for_equal_keys(ys in prop::collection::vec(-3i32..3, 0..24)) {
        let ys: Vec<f64> = ys.into_iter().map(f64::from).collect();
        let faces = sort_faces(&flat_quads(&ys), Axis::Y);
        for w in faces.windows(2) {
            if w[0].key == w[1].key {
                prop_assert!(w[0].source < w[1].source);
            }
        }
    }

    #[test]
    fn idempotent(seed in any::<u64>(), n in 0usize..8) {
        let scene = random_scene(seed, n);
        prop_assert_eq!(sort_faces(&scene, Axis::Y), sort_faces(&scene, Axis::Y));
    }
}
