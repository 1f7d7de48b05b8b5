//! Pose preservation, dirty tracking and copy semantics of frame trees

use approx::assert_relative_eq;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use posegeom::{AxesHierarchy, AxesId, AxesTree, Basis, GeomError, SlipType};

fn basis(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Basis {
    Basis::new(Point3::new(x, y, z), UnitQuaternion::from_euler_angles(roll, pitch, yaw))
}

/// Two independent chains: a -> b -> c and d -> e.
fn forest() -> (AxesTree, [AxesId; 5]) {
    let mut tree = AxesTree::new();
    let a = tree.create_local(basis(1.0, 0.0, 0.0, 0.2, 0.0, 0.9), None).unwrap();
    let b = tree.create_local(basis(0.0, 2.0, 0.5, -0.4, 0.3, 0.0), Some(a)).unwrap();
    let c = tree.create_local(basis(1.5, -1.0, 0.0, 0.0, 1.1, -0.6), Some(b)).unwrap();
    let d = tree.create_local(basis(-4.0, 3.0, 2.0, 0.7, -0.2, 0.1), None).unwrap();
    let e = tree.create_local(basis(0.0, 0.0, -3.0, 0.0, 0.0, 2.0), Some(d)).unwrap();
    (tree, [a, b, c, d, e])
}

fn assert_same_pose(actual: &Basis, expected: &Basis) {
    assert_relative_eq!(actual.origin().x, expected.origin().x, epsilon = 1e-9);
    assert_relative_eq!(actual.origin().y, expected.origin().y, epsilon = 1e-9);
    assert_relative_eq!(actual.origin().z, expected.origin().z, epsilon = 1e-9);
    assert!(actual.is_equivalent(expected));
}

#[test]
fn test_set_parent_preserves_world_pose() {
    let (mut tree, [a, b, c, d, e]) = forest();
    for (child, parent) in [(c, Some(e)), (c, Some(a)), (b, Some(d)), (e, None), (a, Some(e))] {
        let before = tree.global_basis(child).unwrap();
        let local_before = tree.local_basis(child).unwrap();
        tree.set_parent(child, parent).unwrap();
        assert_eq!(tree.parent(child).unwrap(), parent);
        assert_same_pose(&tree.global_basis(child).unwrap(), &before);
        if parent.is_some() {
            assert!(!tree.local_basis(child).unwrap().is_equivalent(&local_before));
        }
    }
}

#[test]
fn test_reparent_under_descendant_is_rejected() {
    let (mut tree, [a, _, c, _, _]) = forest();
    let before = tree.global_basis(a).unwrap();
    match tree.set_parent(a, Some(c)) {
        Err(GeomError::HierarchyCycle { child, parent }) => {
            assert_eq!(child, a);
            assert_eq!(parent, c);
        }
        other => panic!("expected a cycle error, got {:?}", other),
    }
    assert_eq!(tree.parent(a).unwrap(), None);
    assert_same_pose(&tree.global_basis(a).unwrap(), &before);
}

#[test]
fn test_dirty_read_recomputes_exactly_once() {
    let (mut tree, [a, b, c, _, _]) = forest();
    for id in [a, b, c] {
        assert!(tree.get(id).unwrap().is_dirty());
    }
    let first = tree.global_basis(c).unwrap();
    for id in [a, b, c] {
        assert_eq!(tree.get(id).unwrap().recomputations(), 1);
    }
    let second = tree.global_basis(c).unwrap();
    assert_eq!(first, second);
    assert_eq!(tree.get(c).unwrap().recomputations(), 1);

    tree.mark_dirty(b).unwrap();
    assert!(!tree.get(a).unwrap().is_dirty());
    tree.global_basis(c).unwrap();
    tree.global_basis(c).unwrap();
    assert_eq!(tree.get(a).unwrap().recomputations(), 1);
    assert_eq!(tree.get(b).unwrap().recomputations(), 2);
    assert_eq!(tree.get(c).unwrap().recomputations(), 2);
}

#[test]
fn test_copies_keep_pose_after_source_moves() {
    let (mut tree, [a, b, _, _, _]) = forest();

    let free_pose = tree.global_basis(a).unwrap();
    let free = tree.free_copy(a).unwrap();
    let attached_pose = tree.global_basis(b).unwrap();
    let attached = tree.attached_copy(b, true).unwrap();

    tree.translate_by_global(b, &Vector3::new(3.0, 3.0, 3.0)).unwrap();
    assert_same_pose(&tree.global_basis(attached).unwrap(), &attached_pose);
    assert!(!tree.axes_eq(attached, b).unwrap());

    tree.rotate_by(a, &UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 1.3)).unwrap();
    assert_same_pose(&tree.global_basis(free).unwrap(), &free_pose);
    assert_eq!(tree.parent(free).unwrap(), None);
    assert_eq!(tree.parent(attached).unwrap(), Some(a));
}

#[test]
fn test_attached_copy_matches_source_until_moved() {
    let (mut tree, [_, _, c, _, _]) = forest();
    let source_pose = tree.global_basis(c).unwrap();
    let copy = tree.attached_copy(c, true).unwrap();
    tree.translate_to(c, Point3::new(50.0, 0.0, 0.0)).unwrap();
    assert_same_pose(&tree.global_basis(copy).unwrap(), &source_pose);
}

#[test]
fn test_slip_policy_per_child() {
    let (mut tree, [_, b, c, _, _]) = forest();
    let follower = c;
    let stayer = tree.attached_copy(c, false).unwrap();
    assert_eq!(tree.slip_type(stayer).unwrap(), SlipType::Ignore);

    let stayer_before = tree.global_basis(stayer).unwrap();
    let follower_local = tree.local_basis(follower).unwrap();

    let mut target = tree.global_basis(b).unwrap();
    target.rotate_by(&UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.5));
    target.translate_by(&Vector3::new(1.0, -2.0, 0.0));
    tree.slip_to(b, target).unwrap();

    assert_same_pose(&tree.global_basis(b).unwrap(), &target);
    assert_same_pose(&tree.global_basis(stayer).unwrap(), &stayer_before);
    assert_eq!(tree.local_basis(follower).unwrap(), follower_local);
    assert_same_pose(
        &tree.global_basis(follower).unwrap(),
        &target.compose(&follower_local),
    );
}

#[test]
fn test_axis_rays_follow_global_pose() {
    let (mut tree, [_, b, _, _, _]) = forest();
    let global = tree.global_basis(b).unwrap();
    let rays = [tree.x_ray(b).unwrap(), tree.y_ray(b).unwrap(), tree.z_ray(b).unwrap()];
    let headings = [global.x_heading(), global.y_heading(), global.z_heading()];
    for (ray, heading) in rays.iter().zip(headings) {
        assert_relative_eq!(ray.mag(), 1.0, epsilon = 1e-12);
        assert!((ray.heading() - heading).norm() < 1e-12);
        assert!((ray.p1() - global.origin()).norm() < 1e-12);
    }
    assert!(rays[0].heading().cross(&rays[1].heading()).dot(&rays[2].heading()) > 0.999);
}

#[test]
fn test_create_from_world_axes_under_parent() {
    let (mut tree, [a, _, _, _, _]) = forest();
    let id = tree
        .create(
            Point3::new(2.0, 2.0, 2.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Some(a),
        )
        .unwrap();
    let global = tree.global_basis(id).unwrap();
    assert!((global.origin() - Point3::new(2.0, 2.0, 2.0)).norm() < 1e-9);
    assert!((global.x_heading() - Vector3::y()).norm() < 1e-9);
    assert!((global.y_heading() + Vector3::x()).norm() < 1e-9);

    let bad = tree.create(Point3::origin(), Vector3::x(), Vector3::x(), Vector3::z(), None);
    assert!(matches!(bad, Err(GeomError::InvalidGeometry(_))));
}
