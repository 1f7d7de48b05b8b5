//! Small walkthrough of the frame hierarchy and ray queries.
//!
//! Builds a three-joint arm, swings the shoulder, then probes the effector
//! with a few ray intersections. `RUST_LOG=debug` shows hierarchy changes.

use log::{info, LevelFilter};
use nalgebra::{Point3, UnitQuaternion, Vector3};
use posegeom::{AxesHierarchy, AxesTree, Basis, Ray, SphereIntersection};

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() -> posegeom::Result<()> {
    let level = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(LevelFilter::Info);
    init_logger(level);

    let mut tree = AxesTree::new();
    let shoulder = tree.create(Point3::origin(), Vector3::x(), Vector3::y(), Vector3::z(), None)?;
    let elbow = tree.create_local(
        Basis::new(Point3::new(0.0, 2.0, 0.0), UnitQuaternion::identity()),
        Some(shoulder),
    )?;
    let wrist = tree.create_local(
        Basis::new(Point3::new(0.0, 1.5, 0.0), UnitQuaternion::identity()),
        Some(elbow),
    )?;

    info!("wrist at {}", tree.origin(wrist)?);

    tree.rotate_by(
        shoulder,
        &UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_4),
    )?;
    tree.rotate_by(
        elbow,
        &UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -std::f64::consts::FRAC_PI_2),
    )?;
    let effector = tree.origin(wrist)?;
    info!("after swing, wrist at {}", effector);

    // a copy that stays put when the elbow slips
    let marker = tree.attached_copy(wrist, false)?;
    tree.set_parent(marker, Some(elbow))?;
    let mut target = tree.global_basis(elbow)?;
    target.translate_by(&Vector3::new(0.0, 0.0, 1.0));
    tree.slip_to(elbow, target)?;
    info!(
        "elbow slipped: wrist at {}, marker at {}",
        tree.origin(wrist)?,
        tree.origin(marker)?
    );

    let bone = tree.y_ray(elbow)?;
    info!("elbow y axis: {}", bone);
    info!("wrist to elbow axis: {:.6}", bone.dist_to(&tree.origin(wrist)?));

    let probe = Ray::new(Point3::new(-5.0, 0.0, 0.0), Point3::new(5.0, 0.0, 0.0));
    match probe.intersects_sphere(&effector, 3.0) {
        SphereIntersection::Miss => info!("probe misses the reach sphere"),
        SphereIntersection::Single(p) => info!("probe touches the reach sphere at {}", p),
        SphereIntersection::Double(a, b) => info!("probe crosses the reach sphere at {} and {}", a, b),
    }

    let ground = [Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)];
    let drop = Ray::from_heading(effector, -Vector3::z());
    if let Some(hit) = drop.intersects_plane(&ground[0], &ground[1], &ground[2]) {
        info!("effector shadow on ground: {}", hit);
    }

    println!("{}", bone.to_json()?);
    Ok(())
}
